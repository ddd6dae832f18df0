use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::categories::DEFAULT_CATEGORIES;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_category_list(f, chunks[0], app);
    render_usage_panel(f, chunks[1], app);
}

fn render_category_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, name)| {
            let is_default = DEFAULT_CATEGORIES.contains(&name.as_str());
            let style = if i == app.category_index {
                theme::selected_style()
            } else if is_default {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::normal_style()
            };

            let tag = if is_default { "" } else { "  (seen in data)" };
            ListItem::new(Line::from(vec![
                Span::styled(name.clone(), style),
                Span::styled(tag, theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" Categories ({}) ", app.categories.len()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_usage_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " This Month ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let Some(name) = app.categories.get(app.category_index) else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No categories",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let spent = app
        .spending
        .iter()
        .find(|(cat, _)| cat == name)
        .map(|(_, amt)| *amt)
        .unwrap_or(Decimal::ZERO);
    let txn_count = app
        .visible_transactions
        .iter()
        .filter(|t| t.category == *name)
        .count();
    let budget = app
        .budgets
        .iter()
        .find(|b| b.category == *name)
        .map(|b| b.limit_amount);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {name}"),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Spent:        ", theme::dim_style()),
            Span::styled(format_amount(spent), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled(" Transactions: ", theme::dim_style()),
            Span::styled(format!("{txn_count}"), theme::normal_style()),
        ]),
    ];

    match budget {
        Some(limit) => {
            let over = limit > Decimal::ZERO && spent > limit;
            lines.push(Line::from(vec![
                Span::styled(" Budget:       ", theme::dim_style()),
                Span::styled(format_amount(limit), theme::normal_style()),
                if over {
                    Span::styled("  OVER", theme::over_budget_style())
                } else {
                    Span::raw("")
                },
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                " No budget for this month (:budget to add one)",
                theme::dim_style(),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
