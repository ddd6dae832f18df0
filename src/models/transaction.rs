use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    /// Non-negative expense magnitude.
    pub amount: Decimal,
    /// Free-form category label; not constrained to any fixed set.
    pub category: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: String, amount: Decimal, category: String) -> Self {
        Self {
            id: None,
            date,
            description,
            amount,
            category,
        }
    }

    /// True when the transaction falls in the given period.
    /// `month0` is zero-based (0 = January), matching budget months.
    pub fn in_period(&self, year: i32, month0: u32) -> bool {
        self.date.year() == year && self.date.month0() == month0
    }

    /// First day of the transaction's month, used as a time-series bucket key.
    pub fn month_start(&self) -> NaiveDate {
        self.date.with_day(1).unwrap_or(self.date)
    }
}
