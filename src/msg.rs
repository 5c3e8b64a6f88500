use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A button press, after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Confirm,
    Back,
    Quit,
}

impl Input {
    /// Map a key press to a button. Releases and repeats are not edges.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Input::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
            KeyCode::Enter | KeyCode::Char('a') => Some(Input::Confirm),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Input::Back),
            KeyCode::Char('q') => Some(Input::Quit),
            _ => None,
        }
    }
}

/// All possible messages that drive state transitions.
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Resize(u16, u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_buttons() {
        assert_eq!(Input::from_key(press(KeyCode::Up)), Some(Input::Up));
        assert_eq!(Input::from_key(press(KeyCode::Char('j'))), Some(Input::Down));
        assert_eq!(Input::from_key(press(KeyCode::Enter)), Some(Input::Confirm));
        assert_eq!(Input::from_key(press(KeyCode::Esc)), Some(Input::Back));
        assert_eq!(Input::from_key(press(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(Input::from_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Input::from_key(key), Some(Input::Quit));
    }

    #[test]
    fn release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Input::from_key(key), None);
    }
}
