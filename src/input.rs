use crate::snake::Direction::{self, *};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
}

impl Command {
    /// Keys that mean nothing to the game map to `None`.
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }

        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            KeyCode::Esc => Some(Command::Pause),
            _ => None,
        }
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Holds the direction the snake will take on the next tick.
#[derive(Debug)]
pub struct InputRouter {
    pending: Direction,
    allow_reversal: bool,
}

impl InputRouter {
    pub fn new(direction: Direction, allow_reversal: bool) -> Self {
        InputRouter { pending: direction, allow_reversal }
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Queues `direction` for the next tick, replacing anything queued
    /// before. Unless reversals are allowed, a turn straight back against
    /// `current` is dropped. Returns whether the request was taken.
    pub fn request(&mut self, direction: Direction, current: Direction) -> bool {
        if !self.allow_reversal && direction.is_opposite(current) {
            return false;
        }

        self.pending = direction;
        true
    }

    pub fn reset(&mut self, direction: Direction) {
        self.pending = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(Command::from_key_event(&key(KeyCode::Up)), Some(Command::Turn(Up)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('s'))), Some(Command::Turn(Down)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('a'))), Some(Command::Turn(Left)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Right)), Some(Command::Turn(Right)));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key_event(&key(KeyCode::Enter)), None);
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn releases_are_ignored() {
        let ev = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(Command::from_key_event(&ev), None);
    }

    #[test]
    fn ctrl_c_quits_and_esc_pauses() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(Command::from_key_event(&ctrl_c), Some(Command::Quit));
        assert_eq!(Command::from_key_event(&key(KeyCode::Esc)), Some(Command::Pause));
    }

    #[test]
    fn latest_request_wins() {
        let mut router = InputRouter::new(Right, false);

        assert!(router.request(Up, Right));
        assert!(router.request(Down, Right));
        assert_eq!(router.pending(), Down);
    }

    #[test]
    fn reversal_is_dropped_when_guarded() {
        let mut router = InputRouter::new(Right, false);

        assert!(router.request(Up, Right));
        assert!(!router.request(Left, Right));
        assert_eq!(router.pending(), Up);
    }

    #[test]
    fn reversal_goes_through_when_allowed() {
        let mut router = InputRouter::new(Right, true);

        assert!(router.request(Left, Right));
        assert_eq!(router.pending(), Left);
    }

    #[test]
    fn reset_restores_the_default() {
        let mut router = InputRouter::new(Right, false);
        router.request(Down, Right);

        router.reset(Right);

        assert_eq!(router.pending(), Right);
    }
}
