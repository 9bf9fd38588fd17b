use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    ToggleTheme,
    ToggleAuthMode,
    Logout,
    Reload,
    NextTab,
    PrevTab,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Up,
    Down,
    Input(char),
    None,
}

/// Every screen has text inputs, so commands live behind Ctrl and plain
/// characters always type.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Char('t') => AppAction::ToggleTheme,
            KeyCode::Char('s') => AppAction::ToggleAuthMode,
            KeyCode::Char('l') => AppAction::Logout,
            KeyCode::Char('r') => AppAction::Reload,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Left => AppAction::PrevTab,
        KeyCode::Right => AppAction::NextTab,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_letters_are_input() {
        assert_eq!(
            map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            AppAction::Input('q')
        );
        assert_eq!(
            map_key(key(KeyCode::Char('T'), KeyModifiers::SHIFT)),
            AppAction::Input('T')
        );
    }

    #[test]
    fn control_chords_are_commands() {
        assert_eq!(
            map_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            AppAction::ToggleTheme
        );
        assert_eq!(
            map_key(key(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            AppAction::Logout
        );
        assert_eq!(
            map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            AppAction::None
        );
    }

    #[test]
    fn arrows_switch_tabs() {
        assert_eq!(map_key(key(KeyCode::Right, KeyModifiers::NONE)), AppAction::NextTab);
        assert_eq!(map_key(key(KeyCode::Left, KeyModifiers::NONE)), AppAction::PrevTab);
    }
}
