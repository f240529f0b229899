//! Keyboard to action mapping
//!
//! Keys are fixed. The pause key doubles as resume, so the mapping looks at
//! the current game phase.

use crate::game::{Action, GameState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Controls hint shown next to the board
pub const CONTROLS: &[(&str, &str)] = &[
    ("←/→", "Move"),
    ("↓", "Soft Drop"),
    ("↑/Z", "Rotate"),
    ("Space", "Hard Drop"),
    ("P", "Pause"),
    ("R", "Restart"),
    ("H", "High Scores"),
    ("Q", "Quit"),
];

/// Translate a key press into a game action
pub fn map_key(key: KeyEvent, state: GameState) -> Option<Action> {
    // Handle Ctrl+C for quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match normalize_key(key.code) {
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Down => Action::SoftDrop,
        KeyCode::Up | KeyCode::Char('z') => Action::Rotate,
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Char('p') => match state {
            GameState::Paused => Action::Resume,
            _ => Action::Pause,
        },
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('h') => Action::ToggleHighScores,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        let running = GameState::Running;
        assert_eq!(map_key(press(KeyCode::Left), running), Some(Action::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Right), running), Some(Action::MoveRight));
        assert_eq!(map_key(press(KeyCode::Down), running), Some(Action::SoftDrop));
        assert_eq!(map_key(press(KeyCode::Up), running), Some(Action::Rotate));
        assert_eq!(map_key(press(KeyCode::Char('Z')), running), Some(Action::Rotate));
        assert_eq!(map_key(press(KeyCode::Char(' ')), running), Some(Action::HardDrop));
    }

    #[test]
    fn test_pause_key_toggles_by_phase() {
        let p = press(KeyCode::Char('p'));
        assert_eq!(map_key(p, GameState::Running), Some(Action::Pause));
        assert_eq!(map_key(p, GameState::Paused), Some(Action::Resume));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc), GameState::Running), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, GameState::GameOver), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(map_key(press(KeyCode::Char('x')), GameState::Running), None);
        assert_eq!(map_key(press(KeyCode::Tab), GameState::Running), None);
    }
}
