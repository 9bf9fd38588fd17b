use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::{
    app::AppState,
    dashboard::{DraftKind, Tab},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title = if dashboard.submitting == Some(DraftKind::Note) {
        "Create Note (saving...)"
    } else {
        "Create Note"
    };
    let card = Card::new(title, theme).focused(dashboard.focus.is_some());
    let inner = card.inner(columns[0]);
    card.render_frame(frame, columns[0]);
    super::render_fields(frame, inner, Tab::Notes.fields(), dashboard, theme);

    let Some(data) = &dashboard.data else {
        super::render_waiting(frame, columns[1], dashboard, theme);
        return;
    };

    let items = data
        .notes
        .iter()
        .map(|note| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    note.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(note.content.clone()),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(
        List::new(items).block(Card::new("All Notes", theme).block()),
        columns[1],
    );
}
