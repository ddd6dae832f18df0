#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Budget, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(date_str: &str, description: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction::new(
        date_str.parse().unwrap(),
        description.to_string(),
        amount,
        category.to_string(),
    )
}

fn july_2024() -> Vec<Transaction> {
    vec![
        txn("2024-07-01", "Monthly Rent", dec!(1200.00), "Rent"),
        txn("2024-07-05", "Supermarket Run", dec!(150.75), "Groceries"),
        txn("2024-07-05", "Bus Pass", dec!(49.50), "Transport"),
        txn("2024-07-12", "Supermarket Run", dec!(88.10), "Groceries"),
        txn("2024-07-20", "Cinema Tickets", dec!(32.00), "Entertainment"),
    ]
}

#[test]
fn filter_by_period_keeps_only_matching_month() {
    let mut txns = july_2024();
    txns.push(txn("2024-08-01", "August Rent", dec!(1200.00), "Rent"));
    txns.push(txn("2023-07-15", "Old Groceries", dec!(40.00), "Groceries"));

    let filtered = filter_by_period(&txns, 2024, 6);
    assert_eq!(filtered.len(), 5);
    assert!(filtered.iter().all(|t| t.in_period(2024, 6)));
}

#[test]
fn spending_by_category_sums_and_follows_resolver_order() {
    let order = vec![
        "Groceries".to_string(),
        "Rent".to_string(),
        "Transport".to_string(),
        "Entertainment".to_string(),
    ];
    let by_cat = spending_by_category(&july_2024(), &order);
    assert_eq!(
        by_cat,
        vec![
            ("Groceries".to_string(), dec!(238.85)),
            ("Rent".to_string(), dec!(1200.00)),
            ("Transport".to_string(), dec!(49.50)),
            ("Entertainment".to_string(), dec!(32.00)),
        ]
    );
}

#[test]
fn spending_by_category_appends_unknown_categories_in_first_seen_order() {
    let txns = vec![
        txn("2024-07-02", "Vet Visit", dec!(90.00), "Pets"),
        txn("2024-07-03", "Monthly Rent", dec!(1200.00), "Rent"),
        txn("2024-07-04", "Guitar Strings", dec!(15.00), "Hobbies"),
    ];
    let order = vec!["Rent".to_string()];
    let by_cat = spending_by_category(&txns, &order);
    assert_eq!(
        by_cat,
        vec![
            ("Rent".to_string(), dec!(1200.00)),
            ("Pets".to_string(), dec!(90.00)),
            ("Hobbies".to_string(), dec!(15.00)),
        ]
    );
}

#[test]
fn spending_by_category_is_order_independent() {
    let order = vec![
        "Groceries".to_string(),
        "Rent".to_string(),
        "Transport".to_string(),
        "Entertainment".to_string(),
    ];
    let forward = spending_by_category(&july_2024(), &order);
    let mut reversed = july_2024();
    reversed.reverse();
    assert_eq!(forward, spending_by_category(&reversed, &order));
}

#[test]
fn totals_by_month_buckets_ascending() {
    let txns = vec![
        txn("2024-08-01", "August Rent", dec!(1200.00), "Rent"),
        txn("2024-07-01", "July Rent", dec!(1200.00), "Rent"),
        txn("2024-07-20", "Cinema Tickets", dec!(32.00), "Entertainment"),
    ];
    assert_eq!(
        totals_by_month(&txns),
        vec![
            (date(2024, 7, 1), dec!(1232.00)),
            (date(2024, 8, 1), dec!(1200.00)),
        ]
    );
}

#[test]
fn totals_by_day_buckets_ascending() {
    let by_day = totals_by_day(&july_2024());
    assert_eq!(
        by_day,
        vec![
            (date(2024, 7, 1), dec!(1200.00)),
            (date(2024, 7, 5), dec!(200.25)),
            (date(2024, 7, 12), dec!(88.10)),
            (date(2024, 7, 20), dec!(32.00)),
        ]
    );
}

#[test]
fn summary_reports_totals_and_most_frequent_category() {
    let s = summary(&july_2024());
    assert_eq!(s.total, dec!(1520.35));
    assert_eq!(s.count, 5);
    assert_eq!(s.average, dec!(304.07));
    assert_eq!(s.top_category.as_deref(), Some("Groceries"));
}

#[test]
fn summary_of_nothing_is_zeroes() {
    let s = summary(&[]);
    assert_eq!(s.total, Decimal::ZERO);
    assert_eq!(s.count, 0);
    assert_eq!(s.average, Decimal::ZERO);
    assert_eq!(s.top_category, None);
}

#[test]
fn budget_insights_flags_overspend_and_caps_percentage() {
    let actuals = spending_by_category(
        &july_2024(),
        &["Groceries".to_string(), "Rent".to_string()],
    );
    let budgets = vec![
        Budget::new("Rent".to_string(), dec!(1000.00), 6, 2024),
        Budget::new("Groceries".to_string(), dec!(400.00), 6, 2024),
    ];

    let insights = budget_insights(&actuals, &budgets);
    assert_eq!(insights.len(), 2);

    let rent = &insights[0];
    assert_eq!(rent.category, "Rent");
    assert_eq!(rent.budget, dec!(1000.00));
    assert_eq!(rent.actual, dec!(1200.00));
    assert!((rent.percentage - 100.0).abs() < f64::EPSILON);
    assert!(rent.over_budget);

    let groceries = &insights[1];
    assert_eq!(groceries.actual, dec!(238.85));
    assert!(!groceries.over_budget);
    assert!(groceries.percentage > 59.0 && groceries.percentage < 60.0);
}

#[test]
fn budget_insights_skips_zero_limits_and_zeroes_unspent() {
    let actuals = vec![("Transport".to_string(), dec!(49.50))];
    let budgets = vec![
        Budget::new("Transport".to_string(), dec!(0.00), 6, 2024),
        Budget::new("Utilities".to_string(), dec!(150.00), 6, 2024),
    ];

    let insights = budget_insights(&actuals, &budgets);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].category, "Utilities");
    assert_eq!(insights[0].actual, Decimal::ZERO);
    assert!((insights[0].percentage - 0.0).abs() < f64::EPSILON);
    assert!(!insights[0].over_budget);
}

#[test]
fn budget_insights_exactly_on_budget_is_not_over() {
    let actuals = vec![("Rent".to_string(), dec!(1000.00))];
    let budgets = vec![Budget::new("Rent".to_string(), dec!(1000.00), 6, 2024)];

    let insights = budget_insights(&actuals, &budgets);
    assert!(!insights[0].over_budget);
    assert!((insights[0].percentage - 100.0).abs() < f64::EPSILON);
}

#[test]
fn comparison_rows_keep_budgeted_or_spent_categories() {
    let order = vec![
        "Groceries".to_string(),
        "Rent".to_string(),
        "Utilities".to_string(),
        "Transport".to_string(),
    ];
    let actuals = vec![
        ("Groceries".to_string(), dec!(238.85)),
        ("Transport".to_string(), dec!(49.50)),
    ];
    let budgets = vec![Budget::new("Rent".to_string(), dec!(1000.00), 6, 2024)];

    let rows = comparison_rows(&actuals, &budgets, &order);
    assert_eq!(
        rows,
        vec![
            ComparisonRow {
                category: "Groceries".to_string(),
                budget: Decimal::ZERO,
                actual: dec!(238.85),
            },
            ComparisonRow {
                category: "Rent".to_string(),
                budget: dec!(1000.00),
                actual: Decimal::ZERO,
            },
            ComparisonRow {
                category: "Transport".to_string(),
                budget: Decimal::ZERO,
                actual: dec!(49.50),
            },
        ]
    );
}

#[test]
fn comparison_rows_drop_idle_categories() {
    let order = vec!["Groceries".to_string(), "Entertainment".to_string()];
    let rows = comparison_rows(&[], &[], &order);
    assert!(rows.is_empty());
}
