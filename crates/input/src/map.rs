//! Key mapping from terminal events to game actions.
//!
//! | Action | Keys |
//! |---|---|
//! | move left | Left, h, a |
//! | move right | Right, l, d |
//! | soft drop | Down, j, s |
//! | rotate | Up, k, w |
//! | hard drop | Space |
//! | pause | p |
//! | restart | r, Enter |
//!
//! Letters match in either case. Control chords never map to an action.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn letter_action(ch: char) -> Option<GameAction> {
    let action = match ch.to_ascii_lowercase() {
        'h' | 'a' => GameAction::MoveLeft,
        'l' | 'd' => GameAction::MoveRight,
        'j' | 's' => GameAction::SoftDrop,
        'k' | 'w' => GameAction::Rotate,
        ' ' => GameAction::HardDrop,
        'p' => GameAction::Pause,
        'r' => GameAction::Restart,
        _ => return None,
    };
    Some(action)
}

/// Action bound to `key`, if any.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Enter => Some(GameAction::Restart),
        KeyCode::Char(ch) => letter_action(ch),
        _ => None,
    }
}

/// q, Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn arrows_and_letters_agree() {
        let cases = [
            (KeyCode::Left, 'h', 'A', GameAction::MoveLeft),
            (KeyCode::Right, 'L', 'd', GameAction::MoveRight),
            (KeyCode::Down, 'j', 'S', GameAction::SoftDrop),
            (KeyCode::Up, 'K', 'w', GameAction::Rotate),
        ];
        for (arrow, vi, game, action) in cases {
            assert_eq!(press(arrow), Some(action));
            assert_eq!(press(KeyCode::Char(vi)), Some(action));
            assert_eq!(press(KeyCode::Char(game)), Some(action));
        }
    }

    #[test]
    fn drop_pause_and_restart() {
        assert_eq!(press(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(press(KeyCode::Char('P')), Some(GameAction::Pause));
        assert_eq!(press(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Enter), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char('z')), None);
        assert_eq!(press(KeyCode::Tab), None);
    }

    #[test]
    fn control_chords_are_not_actions() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_s), None);
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
