use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

use crate::categories::resolved_categories;
use crate::db::Database;
use crate::insights;
use crate::suggest::Suggester;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "budgets" | "b" => cli_budgets(&args[2..], db),
        "suggest" => cli_suggest(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinTrack — local-only spending and budget tracker");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Print monthly spending summary");
    println!("  budgets [YYYY-MM]             Print budget vs actual for one month");
    println!("  suggest <description>         Suggest a category via the Gemini API");
    println!("  export [path]                 Export transactions to CSV");
    println!("    --month <YYYY-MM>           Month to export (default: current)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Parse an optional `YYYY-MM` argument, defaulting to the current month.
fn parse_month_arg(args: &[String]) -> Result<(i32, u32, String)> {
    let label = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());

    let date = NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month: {label}. Use YYYY-MM (e.g. 2024-07)"))?;
    Ok((date.year(), date.month0(), label))
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let (year, month0, label) = parse_month_arg(args)?;

    let txns = db.get_transactions()?;
    let period = insights::filter_by_period(&txns, year, month0);
    let summary = insights::summary(&period);
    let categories = resolved_categories(db)?;
    let spending = insights::spending_by_category(&period, &categories);

    println!("FinTrack — {label}");
    println!("{}", "─".repeat(40));
    println!("  Total Spent:  ${:.2}", summary.total);
    println!("  Transactions: {}", summary.count);
    println!("  Average:      ${:.2}", summary.average);
    if let Some(top) = &summary.top_category {
        println!("  Top Category: {top}");
    }

    if !spending.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &spending {
            println!("  {name:<24} ${amount:.2}");
        }
    }

    Ok(())
}

fn cli_budgets(args: &[String], db: &mut Database) -> Result<()> {
    let (year, month0, label) = parse_month_arg(args)?;

    let txns = db.get_transactions()?;
    let period = insights::filter_by_period(&txns, year, month0);
    let categories = resolved_categories(db)?;
    let spending = insights::spending_by_category(&period, &categories);
    let budgets = db.get_budgets(month0, year)?;
    let rows = insights::budget_insights(&spending, &budgets);

    if rows.is_empty() {
        println!("No budgets set for {label}");
        return Ok(());
    }

    println!("Budgets — {label}");
    println!(
        "{:<20} {:>12} {:>12} {:>6}",
        "Category", "Budget", "Actual", "Used"
    );
    println!("{}", "─".repeat(55));
    for row in &rows {
        let marker = if row.over_budget { "  OVER" } else { "" };
        println!(
            "{:<20} {:>12} {:>12} {:>5.0}%{marker}",
            row.category,
            format!("${:.2}", row.budget),
            format!("${:.2}", row.actual),
            row.percentage,
        );
    }
    Ok(())
}

fn cli_suggest(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: fintrack suggest <description>");
    }

    let description = args.join(" ");
    let categories = resolved_categories(db)?;
    let suggester = Suggester::from_env()?;
    let category = suggester.suggest(&description, &categories)?;
    println!("{category}");
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/fintrack-export-{month}.csv")
        });

    let count = db.export_to_csv(&output_path, Some(&month))?;
    if count == 0 {
        println!("No transactions for {month}");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
