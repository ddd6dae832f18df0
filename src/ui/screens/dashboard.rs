use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{day_label, format_amount, month_label, period_title, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Spending by category
            Constraint::Length(8), // Trend charts
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_spending_chart(f, chunks[1], app);
    render_trend_row(f, chunks[2], app);
}

fn render_trend_row(f: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_daily_sparkline(f, halves[0], app);
    render_monthly_trend(f, halves[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let over_count = app.budget_insights.iter().filter(|b| b.over_budget).count();

    render_card(
        f,
        cards[0],
        "Total Spending",
        format_amount(app.summary.total),
        theme::RED,
        Some(format!("{} txns", app.summary.count)),
    );
    render_card(
        f,
        cards[1],
        "Average",
        format_amount(app.summary.average),
        theme::ACCENT,
        Some("per transaction".to_string()),
    );
    render_card(
        f,
        cards[2],
        "Top Category",
        app.summary
            .top_category
            .clone()
            .unwrap_or_else(|| "—".to_string()),
        theme::YELLOW,
        Some("by frequency".to_string()),
    );
    render_card(
        f,
        cards[3],
        "Over Budget",
        format!("{over_count}"),
        if over_count > 0 {
            theme::RED
        } else {
            theme::GREEN
        },
        Some(format!("of {} budgets", app.budget_insights.len())),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Spending by Category — {} ", period_title(app.year, app.month0));

    if app.spending.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions for this month. Add one with :add-txn",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .spending
        .iter()
        .take(12)
        .map(|(name, amt)| {
            let val = amt.to_u64().unwrap_or(0);
            let label = truncate(name, 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_daily_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .daily_totals
        .iter()
        .map(|(_, amt)| amt.to_u64().unwrap_or(0))
        .collect();

    let title = match (app.daily_totals.first(), app.daily_totals.last()) {
        (Some((first, _)), Some((last, _))) => {
            format!(" Daily Spending ({} to {}) ", day_label(*first), day_label(*last))
        }
        _ => " Daily Spending ".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}

fn render_monthly_trend(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Monthly Trend ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.monthly_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No data yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // last 12 months at most, oldest to newest
    let start = app.monthly_totals.len().saturating_sub(12);
    let bars: Vec<Bar> = app.monthly_totals[start..]
        .iter()
        .map(|(month, amt)| {
            Bar::default()
                .value(amt.to_u64().unwrap_or(0))
                .label(Line::from(month_label(*month)))
                .style(Style::default().fg(theme::GREEN))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::GREEN))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Transaction;

    fn txn(date: &str, desc: &str, amount: Decimal, category: &str) -> Transaction {
        Transaction::new(
            date.parse().unwrap(),
            desc.to_string(),
            amount,
            category.to_string(),
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn dashboard_renders_daily_and_monthly_trends() {
        let mut app = App::new();
        app.year = 2024;
        app.month0 = 6;
        app.categories = vec!["Rent".to_string(), "Groceries".to_string()];
        app.transactions = vec![
            txn("2024-06-01", "June Rent", dec!(1200.00), "Rent"),
            txn("2024-07-01", "July Rent", dec!(1200.00), "Rent"),
            txn("2024-07-05", "Supermarket Run", dec!(88.10), "Groceries"),
        ];
        app.recompute();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, f.area(), &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Monthly Trend"));
        assert!(text.contains("Jun 24"));
        assert!(text.contains("Jul 24"));
        assert!(text.contains("Daily Spending (Jul 01 to Jul 05)"));
    }

    #[test]
    fn dashboard_renders_empty_store_without_trend_bars() {
        let app = App::new();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, f.area(), &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Monthly Trend"));
        assert!(text.contains("No data yet"));
        assert!(text.contains("Daily Spending"));
    }
}
