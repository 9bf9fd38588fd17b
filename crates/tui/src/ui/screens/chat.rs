use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::AppState,
    dashboard::{DraftKind, Tab},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    match &dashboard.data {
        Some(data) => {
            let items = data
                .messages
                .iter()
                .map(|message| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{}: ", message.username),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(message.text.clone()),
                    ]))
                })
                .collect::<Vec<_>>();

            // Messages arrive oldest first; keep the newest in view.
            let mut list_state = ListState::default();
            if !items.is_empty() {
                list_state.select(Some(items.len() - 1));
            }
            let list = List::new(items).block(Card::new("Student Chat Corner", theme).block());
            frame.render_stateful_widget(list, layout[0], &mut list_state);
        }
        None => super::render_waiting(frame, layout[0], dashboard, theme),
    }

    let title = if dashboard.submitting == Some(DraftKind::Chat) {
        "Sending..."
    } else {
        "Message"
    };
    let card = Card::new(title, theme).focused(true);
    let inner = card.inner(layout[1]);
    card.render_frame(frame, layout[1]);
    super::render_fields(frame, inner, Tab::Chat.fields(), dashboard, theme);
}
