use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            money::{styled_amount, styled_amount_bold},
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

    let label = |text: &'static str| {
        Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
    };
    let summary = &data.summary;

    let mut lines = vec![Line::from(vec![
        label("Name: "),
        Span::raw(summary.username.clone()),
    ])];
    if let Some(profile) = &dashboard.profile {
        lines.push(Line::from(vec![label("Email: "), Span::raw(profile.email.clone())]));
        if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
            lines.push(Line::from(vec![label("Bio: "), Span::raw(bio.to_string())]));
        }
    }
    lines.push(Line::from(vec![
        label("Total Planned: "),
        styled_amount(summary.budget_total, theme),
    ]));
    lines.push(Line::from(vec![
        label("Total Spent: "),
        styled_amount(summary.expense_total, theme),
    ]));
    lines.push(Line::from(vec![
        label("Remaining: "),
        styled_amount_bold(summary.remaining, theme),
    ]));
    lines.push(Line::from(vec![
        label("Transactions: "),
        Span::raw(summary.transaction_count.to_string()),
    ]));

    Card::new("Profile & Stats", theme).render_with(frame, area, Paragraph::new(lines));
}
