use std::io;
use std::time::Duration;

use crate::{Coords, TermCoords, TermInt};
use crate::grid::Grid;
use crate::input::Command;
use crate::options::Options;
use crate::scheduler::{GameEvent, Ticker, spawn_input_listener};
use crate::session::{Session, Update};
use crate::state::{Cause, Cell, Status};
use crate::term::TermManager;

use anyhow::{bail, Result};
use crossterm::event::KeyEventKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Terminal columns used by one board cell, so cells come out roughly square
const CELL_WIDTH: TermInt = 2;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// The single consumer of the event queue. Ticks and key presses are
/// applied strictly one at a time, in the order they were queued.
pub struct SnakeGame {
    session: Session,
    grid: Grid,
    tick_interval: Duration,
    term: TermManager,
    board_origin: TermCoords,
    ticker: Option<Ticker>,
    events_tx: UnboundedSender<GameEvent>,
    events_rx: UnboundedReceiver<GameEvent>,
}

impl SnakeGame {
    pub fn new(options: &Options, term: TermManager) -> Result<Self> {
        let grid = options.grid();
        let (term_w, term_h) = term.get_terminal_size();
        let (board_w, board_h) = board_size(&grid);

        // One extra row under the board for the score line
        if board_w > term_w || board_h + 1 > term_h {
            bail!(
                "terminal is {term_w}x{term_h} but a {size}x{size} board needs at least {need_w}x{need_h}",
                term_w = term_w,
                term_h = term_h,
                size = grid.size(),
                need_w = board_w,
                need_h = board_h + 1,
            );
        }

        let board_origin = ((term_w - board_w) / 2, (term_h - board_h - 1) / 2);
        let session = Session::new(grid, options.allow_reversal, StdRng::from_entropy());
        let (events_tx, events_rx) = unbounded_channel();

        Ok(SnakeGame {
            session,
            grid,
            tick_interval: options.tick_interval(),
            term,
            board_origin,
            ticker: None,
            events_tx,
            events_rx,
        })
    }

    pub fn term(&mut self) -> &mut TermManager {
        &mut self.term
    }

    pub async fn run(&mut self) -> io::Result<()> {
        self.term.setup()?;
        let listener = spawn_input_listener(self.events_tx.clone());

        let res = self.play().await;

        // Closing the queue lets the listener notice and stop
        self.ticker = None;
        self.events_rx.close();
        match listener.await {
            Ok(listener_res) => res.and(listener_res),
            Err(e) => res.and(Err(io::Error::new(io::ErrorKind::Other, e))),
        }
    }

    async fn play(&mut self) -> io::Result<()> {
        self.term.clear()?;
        self.draw_frame()?;
        self.render()?;

        if !self.show_intro().await? {
            return Ok(());
        }

        self.session.start_round();
        self.sync_ticker();
        self.render()?;

        while let Some(event) = self.events_rx.recv().await {
            let update = match event {
                GameEvent::Tick(epoch) => self.session.on_tick(epoch),
                GameEvent::Key(ev) => self.session.on_key(&ev),
            };
            self.sync_ticker();

            match update {
                Update::Nothing => {}
                Update::Redraw => self.render()?,
                Update::GameOver => {
                    self.render()?;
                    self.game_over()?;
                }
                Update::NewRound | Update::Resumed => {
                    self.term.hide_message()?;
                    self.render()?;
                }
                Update::Paused => {
                    self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
                }
                Update::Quit => break,
            }
        }

        Ok(())
    }

    /// Waits for the first key. Returns `false` if the player quit instead.
    async fn show_intro(&mut self) -> io::Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        while let Some(event) = self.events_rx.recv().await {
            if let GameEvent::Key(ev) = event {
                if ev.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(Command::Quit) = Command::from_key_event(&ev) {
                    return Ok(false);
                }
                self.term.hide_message()?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Keeps exactly one timer running for the epoch the session expects,
    /// or none at all.
    fn sync_ticker(&mut self) {
        let wanted = self.session.ticker_epoch();
        if self.ticker.as_ref().map(Ticker::epoch) == wanted {
            return;
        }

        self.ticker = wanted.map(|epoch| Ticker::spawn(epoch, self.tick_interval, self.events_tx.clone()));
    }

    fn game_over(&mut self) -> io::Result<()> {
        let state = self.session.state().clone();
        let score = state.score();
        let headline = match state.status {
            Status::Won => "You won!",
            Status::Over(Cause::Wall) => "You hit the wall!",
            Status::Over(Cause::SelfCollision) => "You bit yourself!",
            Status::Playing => return Ok(()),
        };

        if let Status::Over(_) = state.status {
            let body: Vec<Coords> = state.snake.body().copied().collect();
            for pos in body {
                self.draw_cell(pos, [DEAD_SNAKE_CHAR; 2])?;
            }
            self.term.flush()?;
        }

        self.term.show_message(&[
            headline,
            &*format!("Score: {}", score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])
    }

    fn draw_frame(&mut self) -> io::Result<()> {
        let size = board_size(&self.grid);
        self.term.draw_borders(self.board_origin, size)
    }

    /// Redraws every cell from the current snapshot.
    fn render(&mut self) -> io::Result<()> {
        let state = self.session.state().clone();
        let head = state.snake.head();
        let head_char = state.direction.head_char();

        for pos in self.grid.cells() {
            let text = match state.cell_at(pos) {
                Cell::Snake if pos == head => [head_char, ' '],
                Cell::Snake => [SNAKE_BODY_CHAR; 2],
                Cell::Food => [FOOD_CHAR, ' '],
                Cell::Empty => [' '; 2],
            };
            self.draw_cell(pos, text)?;
        }

        let (_, board_h) = board_size(&self.grid);
        let score_line = format!("Score: {:<6}", state.score());
        self.term.print_str_at((self.board_origin.0, self.board_origin.1 + board_h), &score_line)?;

        self.term.flush()
    }

    fn draw_cell(&mut self, pos: Coords, text: [char; 2]) -> io::Result<()> {
        let x = self.board_origin.0 + 1 + pos.0 * CELL_WIDTH;
        let y = self.board_origin.1 + 1 + pos.1;

        for (i, ch) in text.iter().enumerate() {
            self.term.print_at((x + i as TermInt, y), *ch)?;
        }
        Ok(())
    }
}

fn board_size(grid: &Grid) -> TermCoords {
    (grid.size() * CELL_WIDTH + 2, grid.size() + 2)
}
