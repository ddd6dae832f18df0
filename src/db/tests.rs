#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(date_: NaiveDate, desc: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction::new(date_, desc.into(), amount, category.into())
}

fn seed_july_2024(db: &Database) {
    let txns = [
        txn(date(2024, 7, 1), "Monthly Rent", dec!(1200), "Rent"),
        txn(date(2024, 7, 2), "Weekly Groceries", dec!(75.50), "Groceries"),
        txn(date(2024, 7, 5), "Electricity Bill", dec!(55.20), "Utilities"),
        txn(date(2024, 7, 10), "Movie Night", dec!(35.00), "Entertainment"),
    ];
    for t in &txns {
        db.insert_transaction(t).unwrap();
    }
}

// ── Transaction CRUD ──────────────────────────────────────────

#[test]
fn test_insert_returns_generated_id() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_transaction(&txn(date(2024, 7, 1), "Rent", dec!(1200), "Rent"))
        .unwrap();
    assert!(id > 0);
    let id2 = db
        .insert_transaction(&txn(date(2024, 7, 2), "Groceries", dec!(80), "Groceries"))
        .unwrap();
    assert_ne!(id, id2);
}

#[test]
fn test_get_transactions_sorted_date_desc() {
    let db = Database::open_in_memory().unwrap();
    seed_july_2024(&db);

    let txns = db.get_transactions().unwrap();
    assert_eq!(txns.len(), 4);
    let dates: Vec<NaiveDate> = txns.iter().map(|t| t.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(txns[0].description, "Movie Night");
}

#[test]
fn test_update_transaction_full_replacement() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_transaction(&txn(date(2024, 7, 2), "Groceries", dec!(75.50), "Groceries"))
        .unwrap();

    let edited = txn(date(2024, 7, 3), "Farmers Market", dec!(62.00), "Groceries");
    db.update_transaction(id, &edited).unwrap();

    let all = db.get_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "Farmers Market");
    assert_eq!(all[0].amount, dec!(62.00));
    assert_eq!(all[0].date, date(2024, 7, 3));
    assert_eq!(all[0].id, Some(id));
}

#[test]
fn test_update_missing_id_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .update_transaction(999, &txn(date(2024, 7, 1), "x", dec!(1), "Other"))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoreError>(),
        Some(&StoreError::NotFound(999))
    );
}

#[test]
fn test_delete_missing_id_reports_not_found_and_modifies_nothing() {
    let db = Database::open_in_memory().unwrap();
    seed_july_2024(&db);

    let err = db.delete_transaction(999).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoreError>(),
        Some(&StoreError::NotFound(999))
    );
    // no record modified
    assert_eq!(db.get_transaction_count().unwrap(), 4);
}

#[test]
fn test_delete_existing() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_transaction(&txn(date(2024, 7, 1), "Rent", dec!(1200), "Rent"))
        .unwrap();
    db.delete_transaction(id).unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

// ── Distinct categories ───────────────────────────────────────

#[test]
fn test_distinct_categories_from_both_tables() {
    let db = Database::open_in_memory().unwrap();
    seed_july_2024(&db);
    db.insert_transaction(&txn(date(2024, 7, 20), "More Rent", dec!(10), "Rent"))
        .unwrap();
    db.upsert_budget(&Budget::new("Travel".into(), dec!(300), 6, 2024))
        .unwrap();

    let txn_cats = db.distinct_transaction_categories().unwrap();
    assert_eq!(txn_cats, vec!["Rent", "Groceries", "Utilities", "Entertainment"]);

    let budget_cats = db.distinct_budget_categories().unwrap();
    assert_eq!(budget_cats, vec!["Travel"]);
}

#[test]
fn test_distinct_categories_empty_store() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.distinct_transaction_categories().unwrap().is_empty());
    assert!(db.distinct_budget_categories().unwrap().is_empty());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_upsert_budget_creates_then_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 6, 2024))
        .unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1100), 6, 2024))
        .unwrap();

    let budgets = db.get_budgets(6, 2024).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].limit_amount, dec!(1100));
    assert_eq!(budgets[0].month, 6);
    assert_eq!(budgets[0].year, 2024);
}

#[test]
fn test_budgets_unique_per_period_not_across_periods() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 6, 2024))
        .unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 7, 2024))
        .unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 6, 2025))
        .unwrap();

    assert_eq!(db.get_budgets(6, 2024).unwrap().len(), 1);
    assert_eq!(db.get_budgets(7, 2024).unwrap().len(), 1);
    assert_eq!(db.get_budgets(6, 2025).unwrap().len(), 1);
}

#[test]
fn test_upsert_budget_negative_amount_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .upsert_budget(&Budget::new("Rent".into(), dec!(-5), 6, 2024))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoreError>(),
        Some(&StoreError::InvalidAmount)
    );
    // rejected before reaching persistence
    assert!(db.get_budgets(6, 2024).unwrap().is_empty());
}

#[test]
fn test_upsert_budget_zero_allowed() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(0), 6, 2024))
        .unwrap();
    assert_eq!(db.get_budgets(6, 2024).unwrap().len(), 1);
}

#[test]
fn test_get_budgets_filters_by_period() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 6, 2024))
        .unwrap();
    db.upsert_budget(&Budget::new("Groceries".into(), dec!(400), 5, 2024))
        .unwrap();

    let july = db.get_budgets(6, 2024).unwrap();
    assert_eq!(july.len(), 1);
    assert_eq!(july[0].category, "Rent");
    assert!(db.get_budgets(0, 2024).unwrap().is_empty());
}

#[test]
fn test_delete_budget() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::new("Rent".into(), dec!(1000), 6, 2024))
        .unwrap();
    let id = db.get_budgets(6, 2024).unwrap()[0].id.unwrap();
    db.delete_budget(id).unwrap();
    assert!(db.get_budgets(6, 2024).unwrap().is_empty());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_to_csv() {
    let db = Database::open_in_memory().unwrap();
    seed_july_2024(&db);
    db.insert_transaction(&txn(date(2024, 6, 1), "Monthly Rent", dec!(1200), "Rent"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let path_str = path.to_str().unwrap();

    let count = db.export_to_csv(path_str, Some("2024-07")).unwrap();
    assert_eq!(count, 4);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("date,description,amount,category"));
    assert!(contents.contains("Monthly Rent"));
    assert!(!contents.contains("2024-06-01"));
}

#[test]
fn test_export_all_months() {
    let db = Database::open_in_memory().unwrap();
    seed_july_2024(&db);
    db.insert_transaction(&txn(date(2024, 6, 1), "Monthly Rent", dec!(1200), "Rent"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.csv");
    let count = db.export_to_csv(path.to_str().unwrap(), None).unwrap();
    assert_eq!(count, 5);
}
