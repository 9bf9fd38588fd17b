use ratatui::style::Color;

use crate::local_state::ThemePreference;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(246, 247, 251),
            surface: Color::Rgb(255, 255, 255),
            text: Color::Rgb(30, 34, 44),
            text_muted: Color::Rgb(110, 116, 130),
            border: Color::Rgb(200, 204, 214),
            border_focused: Color::Rgb(79, 70, 229),
            accent: Color::Rgb(79, 70, 229),
            positive: Color::Rgb(22, 130, 70),
            negative: Color::Rgb(190, 40, 50),
            error: Color::Rgb(220, 20, 60),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 68, 78),
            border_focused: Color::Rgb(80, 160, 160),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 190, 120),
            negative: Color::Rgb(220, 100, 100),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
