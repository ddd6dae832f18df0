use rust_decimal::Decimal;

/// A spending limit for one category in one specific month.
///
/// Unique per (category, month, year); saving an existing triple overwrites
/// the limit rather than creating a second row.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub category: String,
    pub limit_amount: Decimal,
    /// Zero-based month, 0 = January through 11 = December.
    pub month: u32,
    pub year: i32,
}

impl Budget {
    pub fn new(category: String, limit_amount: Decimal, month: u32, year: i32) -> Self {
        Self {
            id: None,
            category,
            limit_amount,
            month,
            year,
        }
    }
}
