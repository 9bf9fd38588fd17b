use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::{
    app::AppState,
    dashboard::{DraftKind, FormField, Tab},
    ui::{
        components::{
            card::{Card, StatCard},
            money::styled_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let Some(data) = &dashboard.data else {
        super::render_waiting(frame, area, dashboard, theme);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout[0]);

    let summary = &data.summary;
    StatCard::new("Budget Total", styled_amount(summary.budget_total, theme), theme)
        .render(frame, stats[0]);
    StatCard::new("Expense Total", styled_amount(summary.expense_total, theme), theme)
        .render(frame, stats[1]);
    StatCard::new("Remaining", styled_amount(summary.remaining, theme), theme)
        .subtitle(format!("Transactions: {}", summary.transaction_count))
        .render(frame, stats[2]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(layout[1]);

    let fields = Tab::Dashboard.fields();
    let (budget_fields, expense_fields) = fields.split_at(3);
    render_form(
        frame,
        columns[0],
        "Add Budget Plan",
        DraftKind::Budget,
        budget_fields,
        state,
        theme,
    );
    render_form(
        frame,
        columns[1],
        "Add Expense",
        DraftKind::Expense,
        expense_fields,
        state,
        theme,
    );

    let items = data
        .budgets
        .iter()
        .map(|budget| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    budget.category.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" [{}] ", budget.period),
                    Style::default().fg(theme.accent),
                ),
                styled_amount(budget.amount, theme),
            ]))
        })
        .collect::<Vec<_>>();

    let card = Card::new("Budget Plans", theme);
    frame.render_widget(List::new(items).block(card.block()), columns[2]);
}

fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    kind: DraftKind,
    fields: &[FormField],
    state: &AppState,
    theme: &Theme,
) {
    let dashboard = &state.dashboard;
    let focused = dashboard.focus.is_some_and(|field| field.kind() == kind);
    let card = Card::new(title, theme).focused(focused);
    let inner = card.inner(area);
    card.render_frame(frame, area);
    super::render_fields(frame, inner, fields, dashboard, theme);

    if dashboard.submitting == Some(kind) {
        let status = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1.min(inner.height),
            ..inner
        };
        frame.render_widget(
            Line::styled("Saving...", Style::default().fg(theme.text_muted)),
            status,
        );
    }
}
