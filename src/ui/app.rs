use anyhow::Result;
use chrono::{Datelike, Local, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::categories::resolved_categories;
use crate::db::Database;
use crate::insights::{self, BudgetInsight, ComparisonRow, Summary};
use crate::models::{Budget, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Categories,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    DeleteBudget { id: i64, category: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// Selected period; `month0` is zero-based to match budget rows.
    pub(crate) year: i32,
    pub(crate) month0: u32,

    // Store data
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Vec<Budget>,
    pub(crate) categories: Vec<String>,
    pub(crate) transaction_count: i64,

    // Derived views, recomputed whenever data or period changes
    pub(crate) visible_transactions: Vec<Transaction>,
    pub(crate) summary: Summary,
    pub(crate) spending: Vec<(String, Decimal)>,
    pub(crate) budget_insights: Vec<BudgetInsight>,
    pub(crate) comparison: Vec<ComparisonRow>,
    pub(crate) daily_totals: Vec<(NaiveDate, Decimal)>,
    pub(crate) monthly_totals: Vec<(NaiveDate, Decimal)>,

    // Cursors
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let now = Local::now();

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            year: now.year(),
            month0: now.month0(),

            transactions: Vec::new(),
            budgets: Vec::new(),
            categories: Vec::new(),
            transaction_count: 0,

            visible_transactions: Vec::new(),
            summary: insights::summary(&[]),
            spending: Vec::new(),
            budget_insights: Vec::new(),
            comparison: Vec::new(),
            daily_totals: Vec::new(),
            monthly_totals: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,
            budget_index: 0,
            budget_scroll: 0,
            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// `YYYY-MM` label for the selected period.
    pub(crate) fn period_label(&self) -> String {
        format!("{}-{:02}", self.year, self.month0 + 1)
    }

    /// Parse a `YYYY-MM` string into (year, month0). None when malformed.
    pub(crate) fn parse_period(s: &str) -> Option<(i32, u32)> {
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()?;
        Some((date.year(), date.month0()))
    }

    /// Move the selected period by whole months in either direction.
    pub(crate) fn shift_period(&mut self, delta: i32) {
        let Some(base) = NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1) else {
            return;
        };
        let shifted = if delta >= 0 {
            base.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            base.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        if let Some(d) = shifted {
            self.year = d.year();
            self.month0 = d.month0();
        }
    }

    /// Reload everything from the store and recompute derived views.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.transactions = db.get_transactions()?;
        self.transaction_count = db.get_transaction_count()?;
        self.budgets = db.get_budgets(self.month0, self.year)?;
        self.categories = resolved_categories(db)?;
        self.recompute();
        Ok(())
    }

    /// Rebuild the derived views from data already in memory.
    pub(crate) fn recompute(&mut self) {
        let period = insights::filter_by_period(&self.transactions, self.year, self.month0);

        self.visible_transactions = if self.search_input.is_empty() {
            period.clone()
        } else {
            let needle = self.search_input.to_lowercase();
            period
                .iter()
                .filter(|t| {
                    t.description.to_lowercase().contains(&needle)
                        || t.category.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        };

        self.summary = insights::summary(&period);
        self.spending = insights::spending_by_category(&period, &self.categories);
        self.budget_insights = insights::budget_insights(&self.spending, &self.budgets);
        self.comparison = insights::comparison_rows(&self.spending, &self.budgets, &self.categories);
        self.daily_totals = insights::totals_by_day(&period);
        self.monthly_totals = insights::totals_by_month(&self.transactions);

        self.clamp_cursors();
    }

    fn clamp_cursors(&mut self) {
        if self.transaction_index >= self.visible_transactions.len() {
            self.transaction_index = self.visible_transactions.len().saturating_sub(1);
        }
        if self.budget_index >= self.budgets.len() {
            self.budget_index = self.budgets.len().saturating_sub(1);
        }
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible_transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.budget_index)
    }

    pub(crate) fn page(&self) -> usize {
        self.visible_rows.max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
