use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use api_types::expense::Expense;

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let Some(data) = &dashboard.data else {
        super::render_waiting(frame, area, dashboard, theme);
        return;
    };

    let items = data
        .expenses
        .iter()
        .map(|expense| ListItem::new(expense_lines(expense, theme)))
        .collect::<Vec<_>>();

    let card = Card::new("Transactions & Expense Gallery", theme);
    if items.is_empty() {
        card.render_with(
            frame,
            area,
            Line::styled("No expenses yet.", Style::default().fg(theme.text_muted)),
        );
        return;
    }
    frame.render_widget(List::new(items).block(card.block()), area);
}

fn expense_lines(expense: &Expense, theme: &Theme) -> Vec<Line<'static>> {
    let date = expense
        .spent_on_date()
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| expense.spent_on.clone());

    let mut lines = vec![Line::from(vec![
        Span::styled(
            expense.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        styled_amount(expense.amount, theme),
        Span::styled(
            format!(" #{}", expense.category),
            Style::default().fg(theme.accent),
        ),
    ])];

    lines.push(Line::styled(
        format!("  {date}"),
        Style::default().fg(theme.text_muted),
    ));
    if let Some(note) = expense.note() {
        lines.push(Line::from(format!("  {note}")));
    }
    if let Some(url) = expense.image_url() {
        lines.push(Line::styled(
            format!("  image: {url}"),
            Style::default().fg(theme.text_muted),
        ));
    }
    lines
}
