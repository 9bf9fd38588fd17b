use api_types::Amount;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Amount span colored by sign: negative amounts (overspent) are red.
#[must_use]
pub fn styled_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

/// Bold variant for totals.
#[must_use]
pub fn styled_amount_bold(amount: Amount, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    span.style(style)
}
