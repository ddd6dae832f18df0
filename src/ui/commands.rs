use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::categories::FALLBACK_CATEGORY;
use crate::db::Database;
use crate::models::{Budget, Transaction};
use crate::suggest::Suggester;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinTrack", cmd_quit, r);
    register_command!("quit", "Quit FinTrack", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-07)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-07)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn 2024-07-15 Coffee 4.50)",
        cmd_add_txn,
        r
    );
    register_command!(
        "edit-txn",
        "Replace selected transaction (e.g. :edit-txn 2024-07-15 Coffee 4.50)",
        cmd_edit_txn,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!("rename", "Rename selected transaction", cmd_rename, r);
    register_command!(
        "recat",
        "Re-categorize selected transaction (e.g. :recat Groceries)",
        cmd_recat,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget Groceries 400)",
        cmd_budget,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected budget",
        cmd_delete_budget,
        r
    );
    register_command!(
        "suggest",
        "AI category for the selected transaction (or :suggest <description>)",
        cmd_suggest,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/spending.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(db)?;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_all(db)?;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_all(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_all(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month YYYY-MM (e.g. :month 2024-07)");
        return Ok(());
    }

    // Accept "2024-07" and bare month numbers like "7" within the current year
    let candidate = if args.len() <= 2 {
        format!("{}-{args:0>2}", app.year)
    } else {
        args.to_string()
    };

    if let Some((year, month0)) = App::parse_period(&candidate) {
        app.year = year;
        app.month0 = month0;
        app.refresh_all(db)?;
        app.set_status(format!("Switched to month: {}", app.period_label()));
    } else {
        app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-07)");
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.shift_period(1);
    app.refresh_all(db)?;
    app.set_status(format!("Month: {}", app.period_label()));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.shift_period(-1);
    app.refresh_all(db)?;
    app.set_status(format!("Month: {}", app.period_label()));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.recompute();

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }

    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :add-txn <date> <description> <amount>. Example: :add-txn 2024-07-15 Coffee 4.50",
        );
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :add-txn <date> <description> <amount>");
        return Ok(());
    }

    let date_str = parts[0];
    // Last token is the amount, everything between is the description
    let rest_parts: Vec<&str> = parts[1].rsplitn(2, ' ').collect();
    if rest_parts.len() < 2 {
        app.set_status("Usage: :add-txn <date> <description> <amount>");
        return Ok(());
    }

    let amount_str = rest_parts[0];
    let description = rest_parts[1];

    let date = match NaiveDate::from_str(date_str) {
        Ok(d) => d,
        Err(_) => {
            app.set_status(format!("Invalid date: {date_str}. Use YYYY-MM-DD"));
            return Ok(());
        }
    };

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) if a >= Decimal::ZERO => a,
        Ok(_) => {
            app.set_status("Amount must be non-negative");
            return Ok(());
        }
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let txn = Transaction::new(
        date,
        description.to_string(),
        amount,
        FALLBACK_CATEGORY.to_string(),
    );
    db.insert_transaction(&txn)?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Added: {description} {amount} ({FALLBACK_CATEGORY}; use :recat or :suggest)"
    ));
    Ok(())
}

fn cmd_edit_txn(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.visible_transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :edit-txn <date> <description> <amount>");
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    let rest_parts: Vec<&str> = parts.last().unwrap_or(&"").rsplitn(2, ' ').collect();
    if parts.len() < 2 || rest_parts.len() < 2 {
        app.set_status("Usage: :edit-txn <date> <description> <amount>");
        return Ok(());
    }

    let date = match NaiveDate::from_str(parts[0]) {
        Ok(d) => d,
        Err(_) => {
            app.set_status(format!("Invalid date: {}. Use YYYY-MM-DD", parts[0]));
            return Ok(());
        }
    };
    let amount = match Decimal::from_str(rest_parts[0]) {
        Ok(a) if a >= Decimal::ZERO => a,
        Ok(_) => {
            app.set_status("Amount must be non-negative");
            return Ok(());
        }
        Err(_) => {
            app.set_status(format!("Invalid amount: {}", rest_parts[0]));
            return Ok(());
        }
    };
    let description = rest_parts[1];

    // Full replacement; category is kept, use :recat to change it
    if let Some(txn) = app.selected_transaction() {
        if let Some(id) = txn.id {
            let mut updated = txn.clone();
            updated.date = date;
            updated.description = description.to_string();
            updated.amount = amount;
            db.update_transaction(id, &updated)?;
            app.refresh_all(db)?;
            app.set_status(format!("Updated: {description}"));
        }
    }

    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.visible_transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        if let Some(id) = txn.id {
            let desc = txn.description.clone();
            app.confirm_message = format!("Delete '{desc}'?");
            app.pending_action = Some(PendingAction::DeleteTransaction {
                id,
                description: desc,
            });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.visible_transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if args.is_empty() {
        // Enter editing mode for inline rename
        if let Some(desc) = app.selected_transaction().map(|t| t.description.clone()) {
            app.command_input = desc;
            app.input_mode = InputMode::Editing;
            app.set_status("Type new name, press Enter to confirm");
        }
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        if let Some(id) = txn.id {
            let mut updated = txn.clone();
            updated.description = args.to_string();
            db.update_transaction(id, &updated)?;
            app.refresh_all(db)?;
            app.set_status(format!("Renamed transaction to: {args}"));
        }
    }

    Ok(())
}

fn cmd_recat(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.visible_transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if args.is_empty() {
        app.set_status(format!(
            "Usage: :recat <category>. Known: {}",
            app.categories.join(", ")
        ));
        return Ok(());
    }

    // Categories are free-form; an unknown name simply becomes a new one
    if let Some(txn) = app.selected_transaction() {
        if let Some(id) = txn.id {
            let mut updated = txn.clone();
            updated.category = args.to_string();
            db.update_transaction(id, &updated)?;
            app.refresh_all(db)?;
            app.set_status(format!("Categorized as: {args}"));
        }
    }

    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <category> <amount>. Example: :budget Groceries 400");
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }

    let amount_str = parts[0];
    let category = parts[1];

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };
    if amount < Decimal::ZERO {
        app.set_status("Budget amount cannot be negative");
        return Ok(());
    }

    let budget = Budget::new(category.to_string(), amount, app.month0, app.year);
    db.upsert_budget(&budget)?;
    app.refresh_all(db)?;
    app.screen = Screen::Budgets;
    app.set_status(format!(
        "Budget set: {category} = ${amount} for {}",
        app.period_label()
    ));
    Ok(())
}

fn cmd_delete_budget(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.budgets.is_empty() {
        app.set_status("No budgets to delete");
        return Ok(());
    }

    if let Some(budget) = app.selected_budget() {
        if let Some(id) = budget.id {
            let category = budget.category.clone();
            app.confirm_message = format!("Delete budget for '{category}'?");
            app.pending_action = Some(PendingAction::DeleteBudget { id, category });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_suggest(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let suggester = match Suggester::from_env() {
        Ok(s) => s,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };

    if !args.is_empty() {
        // Standalone lookup, nothing is modified
        match suggester.suggest(args, &app.categories) {
            Ok(category) => app.set_status(format!("Suggested category: {category}")),
            Err(e) => app.set_status(format!("Suggestion failed: {e}")),
        }
        return Ok(());
    }

    if app.screen != Screen::Transactions || app.visible_transactions.is_empty() {
        app.set_status("Select a transaction, or use :suggest <description>");
        return Ok(());
    }

    let Some(txn) = app.selected_transaction().cloned() else {
        return Ok(());
    };
    match suggester.suggest(&txn.description, &app.categories) {
        Ok(category) => {
            if let Some(id) = txn.id {
                let mut updated = txn.clone();
                updated.category = category.clone();
                db.update_transaction(id, &updated)?;
                app.refresh_all(db)?;
            }
            app.set_status(format!("'{}' categorized as: {category}", txn.description));
        }
        Err(e) => app.set_status(format!("Suggestion failed: {e}")),
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = app.period_label();
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/fintrack-export-{month}.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_to_csv(&path, Some(&month))?;
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}
