use crossterm::event::{KeyEvent, KeyEventKind};
use rand::rngs::StdRng;

use crate::log;
use crate::grid::Grid;
use crate::input::{Command, InputRouter};
use crate::state::{GameState, DEFAULT_DIRECTION};

/// What the display has to do after an event was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Update {
    Nothing,
    /// The snapshot moved on, redraw the board
    Redraw,
    /// The last tick ended the game
    GameOver,
    /// A fresh game replaced a finished one
    NewRound,
    Paused,
    Resumed,
    Quit,
}

/// Game rules around the state machine: which ticks count, what keys do,
/// when the timer should be running. Knows nothing about the terminal.
pub struct Session {
    grid: Grid,
    state: GameState,
    router: InputRouter,
    rng: StdRng,
    paused: bool,
    epoch: u64,
    ticking: bool,
}

impl Session {
    pub fn new(grid: Grid, allow_reversal: bool, mut rng: StdRng) -> Self {
        let state = GameState::new(&grid, &mut rng);

        Session {
            grid,
            state,
            router: InputRouter::new(DEFAULT_DIRECTION, allow_reversal),
            rng,
            paused: false,
            epoch: 0,
            ticking: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Epoch the running timer has to carry, if a timer should run at all.
    pub fn ticker_epoch(&self) -> Option<u64> {
        if self.ticking { Some(self.epoch) } else { None }
    }

    /// Arms the timer for the current game.
    pub fn start_round(&mut self) {
        log!(
            "New game on a {0}x{0} board, snake at {1:?}, food at {2:?}",
            self.grid.size(), self.state.snake.head(), self.state.food,
        );
        self.arm();
    }

    pub fn on_tick(&mut self, epoch: u64) -> Update {
        if !self.ticking || self.paused || self.state.is_game_over() || epoch != self.epoch {
            // Queued by a timer that has since been stopped
            return Update::Nothing;
        }

        let next = self.state.tick(self.router.pending(), &self.grid, &mut self.rng);
        let ate = next.snake.len() > self.state.snake.len();
        self.state = next;

        if self.state.is_game_over() {
            self.ticking = false;
            log!("Game over ({:?}) at {:?}, score {}", self.state.status, self.state.snake.head(), self.state.score());
            return Update::GameOver;
        }

        if ate {
            log!("Food spawned at ({}, {})", self.state.food.0, self.state.food.1);
        }
        Update::Redraw
    }

    pub fn on_key(&mut self, ev: &KeyEvent) -> Update {
        let command = Command::from_key_event(ev);

        if let Some(Command::Quit) = command {
            log!("Quit, final score {}", self.state.score());
            return Update::Quit;
        }

        if self.state.is_game_over() {
            // Any key starts over
            if ev.kind == KeyEventKind::Release {
                return Update::Nothing;
            }
            self.reset();
            return Update::NewRound;
        }

        match command {
            Some(Command::Turn(direction)) => {
                if !self.router.request(direction, self.state.direction) {
                    log!("Ignored turn {:?} while heading {:?}", direction, self.state.direction);
                }
                Update::Nothing
            }
            Some(Command::Pause) => self.toggle_pause(),
            Some(Command::Quit) | None => Update::Nothing,
        }
    }

    fn reset(&mut self) {
        log!("Reset");
        self.state = GameState::new(&self.grid, &mut self.rng);
        self.router.reset(DEFAULT_DIRECTION);
        self.paused = false;
        self.start_round();
    }

    fn toggle_pause(&mut self) -> Update {
        self.paused = !self.paused;

        if self.paused {
            self.ticking = false;
            log!("Paused");
            Update::Paused
        } else {
            self.arm();
            log!("Resumed");
            Update::Resumed
        }
    }

    fn arm(&mut self) {
        self.epoch += 1;
        self.ticking = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Walls;
    use crate::snake::Direction::*;
    use crate::state::Status;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use rand::SeedableRng;

    fn session(walls: Walls) -> Session {
        let mut session = Session::new(Grid::new(5, walls), false, StdRng::seed_from_u64(5));
        session.start_round();
        session
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Drives the default snake (head at (2,2), heading right) into the
    /// right-hand wall of a solid board.
    fn crash(session: &mut Session) {
        for _ in 0..3 {
            let epoch = session.ticker_epoch().unwrap();
            session.on_tick(epoch);
        }
        assert!(session.state().is_game_over());
    }

    #[test]
    fn ticks_move_the_snake() {
        let mut session = session(Walls::Wrap);
        let epoch = session.ticker_epoch().unwrap();

        assert_eq!(session.on_tick(epoch), Update::Redraw);
        assert_eq!(session.state().snake.head(), (3, 2));
    }

    #[test]
    fn nothing_ticks_before_the_round_starts() {
        let mut session = Session::new(Grid::new(5, Walls::Wrap), false, StdRng::seed_from_u64(5));

        assert_eq!(session.ticker_epoch(), None);
        assert_eq!(session.on_tick(0), Update::Nothing);
        assert_eq!(session.state().snake.head(), (2, 2));
    }

    #[test]
    fn crashing_stops_the_timer() {
        let mut session = session(Walls::Solid);
        let epoch = session.ticker_epoch().unwrap();

        assert_eq!(session.on_tick(epoch), Update::Redraw);
        assert_eq!(session.on_tick(epoch), Update::Redraw);
        assert_eq!(session.on_tick(epoch), Update::GameOver);
        assert_eq!(session.ticker_epoch(), None);
    }

    #[test]
    fn any_key_after_game_over_starts_a_fresh_game() {
        let mut session = session(Walls::Solid);
        crash(&mut session);

        assert_eq!(session.on_key(&key(KeyCode::Char('x'))), Update::NewRound);
        assert_eq!(session.state().status, Status::Playing);
        assert_eq!(session.state().snake.head(), (2, 2));
        assert_eq!(session.state().direction, Right);
        assert!(session.ticker_epoch().is_some());
    }

    #[test]
    fn key_release_after_game_over_is_ignored() {
        let mut session = session(Walls::Solid);
        crash(&mut session);
        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(session.on_key(&release), Update::Nothing);
        assert!(session.state().is_game_over());
    }

    #[test]
    fn ctrl_c_quits_even_after_game_over() {
        let mut session = session(Walls::Solid);
        crash(&mut session);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(session.on_key(&ctrl_c), Update::Quit);
    }

    #[test]
    fn ticks_from_before_a_reset_are_stale() {
        let mut session = session(Walls::Solid);
        let old_epoch = session.ticker_epoch().unwrap();
        crash(&mut session);
        session.on_key(&key(KeyCode::Enter));
        let fresh = session.state().clone();

        assert_eq!(session.on_tick(old_epoch), Update::Nothing);
        assert_eq!(session.state(), &fresh);
    }

    #[test]
    fn guard_checks_the_direction_of_the_last_move() {
        let mut session = session(Walls::Wrap);

        session.on_key(&key(KeyCode::Up));
        session.on_key(&key(KeyCode::Left));
        let epoch = session.ticker_epoch().unwrap();
        session.on_tick(epoch);

        assert_eq!(session.state().direction, Up);
        assert_eq!(session.state().snake.head(), (2, 1));
    }

    #[test]
    fn pause_stops_ticks_and_resume_rearms() {
        let mut session = session(Walls::Wrap);
        let before_pause = session.ticker_epoch().unwrap();

        assert_eq!(session.on_key(&key(KeyCode::Esc)), Update::Paused);
        assert_eq!(session.ticker_epoch(), None);
        assert_eq!(session.on_tick(before_pause), Update::Nothing);
        assert_eq!(session.state().snake.head(), (2, 2));

        assert_eq!(session.on_key(&key(KeyCode::Esc)), Update::Resumed);
        let resumed = session.ticker_epoch().unwrap();
        assert_ne!(resumed, before_pause);
        assert_eq!(session.on_tick(before_pause), Update::Nothing);
        assert_eq!(session.on_tick(resumed), Update::Redraw);
        assert_eq!(session.state().snake.head(), (3, 2));
    }
}
