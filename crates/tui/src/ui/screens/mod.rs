pub mod chat;
pub mod dashboard;
pub mod login;
pub mod notes;
pub mod profile;
pub mod transactions;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use crate::{
    dashboard::{Dashboard, FormField},
    ui::{components::form::Input, theme::Theme},
};

/// Renders one input row per field, highlighting the focused one.
fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    fields: &[FormField],
    dashboard: &Dashboard,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (row, field) in rows.iter().zip(fields) {
        Input::new(field.placeholder(), dashboard.drafts.value(*field))
            .focused(dashboard.focus == Some(*field))
            .render(frame, *row, theme);
    }
}

/// Centered placeholder shown while the first load is still running.
fn render_waiting(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let text = match &dashboard.error {
        Some(err) => format!("Could not load your data: {err}"),
        None => "Loading...".to_string(),
    };
    let style = if dashboard.error.is_some() {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.text_muted)
    };
    frame.render_widget(
        Paragraph::new(Line::styled(text, style)).alignment(Alignment::Center),
        area,
    );
}
