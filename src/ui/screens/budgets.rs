use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, period_title, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_budget_list(f, chunks[0], app);
    render_comparison(f, chunks[1], app);
}

fn render_budget_list(f: &mut Frame, area: Rect, app: &App) {
    if app.budgets.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let items: Vec<ListItem> = app
        .budgets
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, budget)| {
            let actual = app
                .spending
                .iter()
                .find(|(name, _)| *name == budget.category)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);

            let ratio = if budget.limit_amount > Decimal::ZERO {
                (actual / budget.limit_amount)
                    .to_f64()
                    .unwrap_or(0.0)
                    .min(1.0)
            } else {
                0.0
            };
            let over = budget.limit_amount > Decimal::ZERO && actual > budget.limit_amount;
            let color = theme::gauge_color(ratio);

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let bar = progress_bar(ratio, 20);
            let display_name = truncate(&budget.category, 17);

            let mut spans = vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(actual),
                        format_amount(budget.limit_amount)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ];
            if over {
                spans.push(Span::styled(" OVER", theme::over_budget_style()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budgets — {} ", period_title(app.year, app.month0)),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_comparison(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Budget vs Actual ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.comparison.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing budgeted or spent this month",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Category", "Budget", "Actual", "Difference"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .comparison
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .map(|row| {
            let diff = row.budget - row.actual;
            let diff_style = if diff < Decimal::ZERO && row.budget > Decimal::ZERO {
                theme::over_budget_style()
            } else if row.budget.is_zero() {
                theme::dim_style()
            } else {
                Style::default().fg(theme::GREEN)
            };
            let diff_text = if row.budget.is_zero() {
                "unbudgeted".to_string()
            } else if diff < Decimal::ZERO {
                format!("-{}", format_amount(-diff))
            } else {
                format_amount(diff)
            };

            Row::new(vec![
                Cell::from(truncate(&row.category, 18)),
                Cell::from(format_amount(row.budget)),
                Cell::from(format_amount(row.actual)),
                Cell::from(Span::styled(diff_text, diff_style)),
            ])
            .style(theme::normal_style())
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "No budgets set for {}",
                period_title(app.year, app.month0)
            ),
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <category> <amount> to set a spending limit",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budgets ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::progress_bar;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.5, 10), "[█████░░░░░]");
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    }

    #[test]
    fn progress_bar_never_exceeds_its_width() {
        assert_eq!(progress_bar(1.0, 4), "[████]");
        assert_eq!(progress_bar(2.5, 4), "[████]");
    }
}
