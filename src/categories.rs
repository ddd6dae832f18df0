use anyhow::Result;

use crate::db::Database;

/// Static fallback list; guarantees a non-empty category set on a fresh
/// install. Observed categories are appended after these.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "Groceries",
    "Rent",
    "Utilities",
    "Transport",
    "Entertainment",
    "Other",
];

/// Category substituted when a suggestion is missing or invalid.
pub(crate) const FALLBACK_CATEGORY: &str = "Other";

/// Merge the static defaults with categories observed in transactions and
/// budgets: de-duplicated by first occurrence, static entries first.
pub(crate) fn resolve_categories(observed_txn: &[String], observed_budget: &[String]) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::new();
    for name in DEFAULT_CATEGORIES
        .iter()
        .map(|s| (*s).to_string())
        .chain(observed_txn.iter().cloned())
        .chain(observed_budget.iter().cloned())
    {
        if !resolved.contains(&name) {
            resolved.push(name);
        }
    }
    resolved
}

/// Resolved category list for the whole store.
pub(crate) fn resolved_categories(db: &Database) -> Result<Vec<String>> {
    let txn_cats = db.distinct_transaction_categories()?;
    let budget_cats = db.distinct_budget_categories()?;
    Ok(resolve_categories(&txn_cats, &budget_cats))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_empty_store_yields_static_list() {
        let resolved = resolve_categories(&[], &[]);
        assert_eq!(resolved, strings(DEFAULT_CATEGORIES));
    }

    #[test]
    fn test_statics_always_present_and_first() {
        let resolved = resolve_categories(&strings(&["Coffee", "Rent"]), &strings(&["Travel"]));
        // every static entry appears, before any observed-only entry
        for (i, name) in DEFAULT_CATEGORIES.iter().enumerate() {
            assert_eq!(resolved[i], *name);
        }
        assert_eq!(resolved[DEFAULT_CATEGORIES.len()..], strings(&["Coffee", "Travel"]));
    }

    #[test]
    fn test_each_category_appears_exactly_once() {
        let resolved = resolve_categories(
            &strings(&["Rent", "Coffee", "Coffee", "Groceries"]),
            &strings(&["Coffee", "Rent", "Travel"]),
        );
        for name in &resolved {
            assert_eq!(resolved.iter().filter(|n| *n == name).count(), 1, "{name} duplicated");
        }
        assert!(resolved.contains(&"Coffee".to_string()));
        assert!(resolved.contains(&"Travel".to_string()));
    }

    #[test]
    fn test_observed_order_is_first_occurrence() {
        let resolved = resolve_categories(&strings(&["Zoo", "Aquarium"]), &strings(&["Aquarium", "Books"]));
        let tail = &resolved[DEFAULT_CATEGORIES.len()..];
        assert_eq!(tail, strings(&["Zoo", "Aquarium", "Books"]));
    }

    #[test]
    fn test_fallback_is_in_static_list() {
        assert!(DEFAULT_CATEGORIES.contains(&FALLBACK_CATEGORY));
    }
}
