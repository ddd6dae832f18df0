mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Structured store failures the UI needs to tell apart from generic
/// upstream errors. Carried inside `anyhow::Error`; callers downcast.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[error("transaction {0} not found")]
    NotFound(i64),
    #[error("budget amount must not be negative")]
    InvalidAmount,
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (date, description, amount, category)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                txn.date.to_string(),
                txn.description,
                txn.amount.to_string(),
                txn.category,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Full-replacement edit. `StoreError::NotFound` when the id does not
    /// exist; no row is touched in that case.
    pub(crate) fn update_transaction(&self, id: i64, txn: &Transaction) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE transactions SET date = ?1, description = ?2, amount = ?3, category = ?4
             WHERE id = ?5",
            params![
                txn.date.to_string(),
                txn.description,
                txn.amount.to_string(),
                txn.category,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id).into());
        }
        Ok(())
    }

    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id).into());
        }
        Ok(())
    }

    /// All transactions, newest first (date then id descending).
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, description, amount, category
             FROM transactions ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(1)?;
            let amount_str: String = row.get(3)?;
            Ok(Transaction {
                id: Some(row.get(0)?),
                date: NaiveDate::from_str(&date_str).unwrap_or_default(),
                description: row.get(2)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Categories ────────────────────────────────────────────

    /// Distinct category values in first-seen order.
    pub(crate) fn distinct_transaction_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM transactions GROUP BY category ORDER BY MIN(id)")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn distinct_budget_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM budgets GROUP BY category ORDER BY MIN(id)")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Create or overwrite the limit for (category, month, year).
    /// Negative amounts are rejected before any SQL runs.
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        if budget.limit_amount < Decimal::ZERO {
            return Err(StoreError::InvalidAmount.into());
        }
        self.conn.execute(
            "INSERT INTO budgets (category, month, year, limit_amount)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(category, month, year) DO UPDATE SET limit_amount = ?4",
            params![
                budget.category,
                budget.month,
                budget.year,
                budget.limit_amount.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Budgets for one period. `month` is zero-based (0-11).
    pub(crate) fn get_budgets(&self, month: u32, year: i32) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, month, year, limit_amount
             FROM budgets WHERE month = ?1 AND year = ?2 ORDER BY category",
        )?;
        let rows = stmt.query_map(params![month, year], |row| {
            let amt_str: String = row.get(4)?;
            Ok(Budget {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                month: row.get(2)?,
                year: row.get(3)?,
                limit_amount: Decimal::from_str(&amt_str).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_budget(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    /// Write transactions to a CSV file, optionally restricted to one
    /// `YYYY-MM` month. Returns the number of rows written.
    pub(crate) fn export_to_csv(&self, path: &str, month: Option<&str>) -> Result<usize> {
        let txns = self.get_transactions()?;
        let txns: Vec<&Transaction> = txns
            .iter()
            .filter(|t| match month {
                Some(m) => t.date.to_string().starts_with(m),
                None => true,
            })
            .collect();

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        writer.write_record(["date", "description", "amount", "category"])?;
        for txn in &txns {
            writer.write_record([
                txn.date.to_string(),
                txn.description.clone(),
                txn.amount.to_string(),
                txn.category.clone(),
            ])?;
        }
        writer.flush()?;
        Ok(txns.len())
    }
}

#[cfg(test)]
mod tests;
