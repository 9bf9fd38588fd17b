use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::AppState,
    auth::{AuthField, AuthMode},
    ui::{components::form::Input, theme::Theme},
};

/// Calculates a centered rect for the auth card.
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.auth;
    let fields = form.mode.fields();

    // subtitle, spacer, one row per field, spacer, hint
    let box_height = fields.len() as u16 + 6;
    let card_area = centered_box(46, box_height, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(format!(" {} ", form.mode.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(1)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Track expenses, budgets, chats and notes.",
            Style::default().fg(theme.text_muted),
        )),
        rows[0],
    );

    for (i, field) in fields.iter().enumerate() {
        Input::new(field.placeholder(), form.value(*field))
            .focused(form.focus == *field)
            .masked(*field == AuthField::Password)
            .render(frame, rows[i + 2], theme);
    }

    let (submit, other) = match form.mode {
        AuthMode::Login => ("Login", "Sign Up"),
        AuthMode::Signup => ("Sign Up", "Login"),
    };
    let hint = if state.probing {
        Line::styled("Checking session...", Style::default().fg(theme.text_muted))
    } else if form.pending {
        Line::styled("Please wait...", Style::default().fg(theme.text_muted))
    } else {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(format!(" {submit}  ")),
            Span::styled("^S", Style::default().fg(theme.accent)),
            Span::raw(format!(" switch to {other}  ")),
            Span::styled("^C", Style::default().fg(theme.accent)),
            Span::raw(" quit"),
        ])
    };
    frame.render_widget(Paragraph::new(hint), rows[fields.len() + 3]);

    // Error message below the box (only shown when there's an error)
    if let Some(message) = &form.error {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y.saturating_add(card_area.height + 1),
            width: card_area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}
