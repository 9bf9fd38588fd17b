pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{app::AppState, auth::Session, dashboard::Tab};

use components::hints::{KeyHint, hints_to_spans, hint_separator};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::for_preference(state.theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    match state.session {
        Session::Unauthenticated => screens::login::render(frame, area, state, &theme),
        Session::Authenticated => render_shell(frame, area, state, &theme),
    }

    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, theme);
    components::tabs::render_tabs(frame, layout[1], state.dashboard.tab, theme);

    let content = layout[2];
    match state.dashboard.tab {
        Tab::Dashboard => screens::dashboard::render(frame, content, state, theme),
        Tab::Transactions => screens::transactions::render(frame, content, state, theme),
        Tab::Profile => screens::profile::render(frame, content, state, theme),
        Tab::Notes => screens::notes::render(frame, content, state, theme),
        Tab::Chat => screens::chat::render(frame, content, state, theme),
    }

    render_bottom_bar(frame, layout[3], state, theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let user = dashboard
        .data
        .as_ref()
        .map(|data| data.summary.username.as_str())
        .or_else(|| dashboard.profile.as_ref().map(|p| p.name.as_str()))
        .unwrap_or("-");

    let (status, status_style) = if dashboard.loading || state.logging_out {
        ("SYNC", Style::default().fg(theme.accent))
    } else if dashboard.error.is_some() {
        ("ERR", Style::default().fg(theme.error))
    } else {
        ("OK", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled(
            "Campus Cashflow Planner  ",
            Style::default().fg(theme.accent),
        ),
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Theme", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.theme.label())),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_to_spans(&[KeyHint::new("←→", "tabs")], theme);

    let context = context_hints(state.dashboard.tab);
    if !context.is_empty() {
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(&context, theme));
    }

    parts.push(hint_separator(theme));
    parts.extend(hints_to_spans(
        &[
            KeyHint::new("^R", "reload"),
            KeyHint::new("^T", "theme"),
            KeyHint::new("^L", "logout"),
            KeyHint::new("^C", "quit"),
        ],
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(tab: Tab) -> Vec<KeyHint> {
    match tab {
        Tab::Dashboard => vec![
            KeyHint::new("Tab", "next field"),
            KeyHint::new("↑↓", "period"),
            KeyHint::new("Enter", "save"),
        ],
        Tab::Notes => vec![KeyHint::new("Tab", "next field"), KeyHint::new("Enter", "save")],
        Tab::Chat => vec![KeyHint::new("Enter", "send")],
        Tab::Transactions | Tab::Profile => Vec::new(),
    }
}
