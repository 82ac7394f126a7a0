//! Key mapping
//!
//! Space means "pause" during a run and "confirm" on the menu and game over
//! screens, so mapping depends on the phase.

use crate::sim::{Direction, GamePhase, Input};

/// Platform-neutral keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Arrow(Direction),
    Space,
    Enter,
    Escape,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value (arrows and WASD)
    pub fn from_dom(key: &str) -> Option<Self> {
        let key = match key {
            "ArrowUp" | "w" | "W" => Key::Arrow(Direction::Up),
            "ArrowDown" | "s" | "S" => Key::Arrow(Direction::Down),
            "ArrowLeft" | "a" | "A" => Key::Arrow(Direction::Left),
            "ArrowRight" | "d" | "D" => Key::Arrow(Direction::Right),
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// Translate a key press into a session input for the current phase.
///
/// Direction keys always map to `Steer`; the state machine ignores them
/// outside a run.
pub fn map_key(phase: GamePhase, key: Key) -> Option<Input> {
    use GamePhase as P;
    match (key, phase) {
        (Key::Arrow(dir), _) => Some(Input::Steer(dir)),
        (Key::Space, P::Playing | P::Paused) => Some(Input::TogglePause),
        (Key::Space | Key::Enter, P::Menu | P::GameOver) => Some(Input::Confirm),
        (Key::Escape, P::GameOver) => Some(Input::ReturnToMenu),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_depends_on_phase() {
        assert_eq!(map_key(GamePhase::Playing, Key::Space), Some(Input::TogglePause));
        assert_eq!(map_key(GamePhase::Paused, Key::Space), Some(Input::TogglePause));
        assert_eq!(map_key(GamePhase::Menu, Key::Space), Some(Input::Confirm));
        assert_eq!(map_key(GamePhase::GameOver, Key::Space), Some(Input::Confirm));
    }

    #[test]
    fn test_enter_and_escape() {
        assert_eq!(map_key(GamePhase::Menu, Key::Enter), Some(Input::Confirm));
        assert_eq!(map_key(GamePhase::Playing, Key::Enter), None);
        assert_eq!(map_key(GamePhase::GameOver, Key::Escape), Some(Input::ReturnToMenu));
        assert_eq!(map_key(GamePhase::Playing, Key::Escape), None);
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Arrow(Direction::Left)));
        assert_eq!(Key::from_dom("W"), Some(Key::Arrow(Direction::Up)));
        assert_eq!(Key::from_dom(" "), Some(Key::Space));
        assert_eq!(Key::from_dom("Shift"), None);
    }
}
