use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// One form input row: value plus cursor when focused, placeholder when
/// empty.
pub struct Input<'a> {
    pub placeholder: &'a str,
    pub value: &'a str,
    pub focused: bool,
    pub masked: bool,
}

impl<'a> Input<'a> {
    pub fn new(placeholder: &'a str, value: &'a str) -> Self {
        Self {
            placeholder,
            value,
            focused: false,
            masked: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.to_string()
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let marker = if self.focused { "› " } else { "  " };
        let cursor = if self.focused { "│" } else { "" };

        let body = if self.value.is_empty() {
            Span::styled(
                format!("{}{cursor}", self.placeholder),
                Style::default().fg(theme.text_muted),
            )
        } else {
            let style = if self.focused {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text)
            };
            Span::styled(format!("{}{cursor}", self.display()), style)
        };

        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            body,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_input_hides_every_char() {
        let input = Input::new("Password", "sécret").masked(true);
        assert_eq!(input.display(), "••••••");
    }
}
