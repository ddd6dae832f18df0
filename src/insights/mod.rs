//! Spending aggregation and budget comparison.
//!
//! Everything here is a single-pass transform over an in-memory transaction
//! slice; callers pre-filter by period where a view is month-scoped.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Budget, Transaction};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub top_category: Option<String>,
}

/// One category's spend measured against its budget limit.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInsight {
    pub category: String,
    pub budget: Decimal,
    pub actual: Decimal,
    /// Consumed share of the limit, clamped to [0, 100].
    pub percentage: f64,
    pub over_budget: bool,
}

/// Raw budget-vs-actual pairing, unbudgeted spending included.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub category: String,
    pub budget: Decimal,
    pub actual: Decimal,
}

/// Transactions falling in one period. `month0` is zero-based.
pub fn filter_by_period(txns: &[Transaction], year: i32, month0: u32) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| t.in_period(year, month0))
        .cloned()
        .collect()
}

/// Sum amounts per category. Output order follows `resolved_order` for
/// categories it knows, then first occurrence for the rest; categories with
/// no matching transactions are omitted.
pub fn spending_by_category(
    txns: &[Transaction],
    resolved_order: &[String],
) -> Vec<(String, Decimal)> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for txn in txns {
        *totals.entry(txn.category.as_str()).or_insert(Decimal::ZERO) += txn.amount;
    }

    let mut out: Vec<(String, Decimal)> = Vec::new();
    for name in resolved_order {
        if let Some(total) = totals.remove(name.as_str()) {
            out.push((name.clone(), total));
        }
    }
    // categories the resolver does not know yet, in first-seen order
    for txn in txns {
        if let Some(total) = totals.remove(txn.category.as_str()) {
            out.push((txn.category.clone(), total));
        }
    }
    out
}

/// Sum amounts per calendar month, ascending by month start.
pub fn totals_by_month(txns: &[Transaction]) -> Vec<(NaiveDate, Decimal)> {
    let mut totals: HashMap<NaiveDate, Decimal> = HashMap::new();
    for txn in txns {
        *totals.entry(txn.month_start()).or_insert(Decimal::ZERO) += txn.amount;
    }
    let mut out: Vec<(NaiveDate, Decimal)> = totals.into_iter().collect();
    out.sort_by_key(|(start, _)| *start);
    out
}

/// Sum amounts per day, ascending. Used when a single month is selected.
pub fn totals_by_day(txns: &[Transaction]) -> Vec<(NaiveDate, Decimal)> {
    let mut totals: HashMap<NaiveDate, Decimal> = HashMap::new();
    for txn in txns {
        *totals.entry(txn.date).or_insert(Decimal::ZERO) += txn.amount;
    }
    let mut out: Vec<(NaiveDate, Decimal)> = totals.into_iter().collect();
    out.sort_by_key(|(day, _)| *day);
    out
}

pub fn summary(txns: &[Transaction]) -> Summary {
    let total: Decimal = txns.iter().map(|t| t.amount).sum();
    let count = txns.len();
    let average = if count > 0 {
        total / Decimal::from(count)
    } else {
        Decimal::ZERO
    };

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for txn in txns {
        match counts.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((txn.category.as_str(), 1)),
        }
    }
    // highest count wins; first-seen breaks ties
    let mut top: Option<(&str, usize)> = None;
    for &(name, n) in &counts {
        if top.is_none_or(|(_, m)| n > m) {
            top = Some((name, n));
        }
    }
    let top_category = top.map(|(name, _)| name.to_string());

    Summary {
        total,
        count,
        average,
        top_category,
    }
}

/// Spend measured against limits, for categories that have a limit.
///
/// Seeded from the budget set: a budgeted category with no spending shows as
/// zero actual. Unbudgeted spending is deliberately absent here; it belongs
/// to [`comparison_rows`], which answers a different question.
pub fn budget_insights(
    actuals: &[(String, Decimal)],
    budgets: &[Budget],
) -> Vec<BudgetInsight> {
    budgets
        .iter()
        .filter(|b| b.limit_amount > Decimal::ZERO)
        .map(|b| {
            let actual = actuals
                .iter()
                .find(|(name, _)| *name == b.category)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);
            let percentage = (actual / b.limit_amount)
                .to_f64()
                .unwrap_or(0.0)
                .clamp(0.0, 1.0)
                * 100.0;
            BudgetInsight {
                category: b.category.clone(),
                budget: b.limit_amount,
                actual,
                percentage,
                over_budget: actual > b.limit_amount,
            }
        })
        .collect()
}

/// Budget-vs-actual rows seeded from the resolved category list, keeping any
/// category with a limit or with spending. Order follows the resolver.
pub fn comparison_rows(
    actuals: &[(String, Decimal)],
    budgets: &[Budget],
    resolved_order: &[String],
) -> Vec<ComparisonRow> {
    resolved_order
        .iter()
        .map(|name| {
            let budget = budgets
                .iter()
                .find(|b| b.category == *name)
                .map(|b| b.limit_amount)
                .unwrap_or(Decimal::ZERO);
            let actual = actuals
                .iter()
                .find(|(cat, _)| cat == name)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);
            ComparisonRow {
                category: name.clone(),
                budget,
                actual,
            }
        })
        .filter(|row| row.budget > Decimal::ZERO || row.actual > Decimal::ZERO)
        .collect()
}

#[cfg(test)]
mod tests;
