use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::log;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything the game loop reacts to, in the order it happened.
#[derive(Debug)]
pub enum GameEvent {
    /// A timer tick, tagged with the epoch of the ticker that produced it
    Tick(u64),
    Key(KeyEvent),
}

/// A running tick timer. Dropping it stops the ticks.
pub struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Starts sending `GameEvent::Tick(epoch)` every `period`, the first one
    /// a full period from now.
    pub fn spawn(epoch: u64, period: Duration, tx: UnboundedSender<GameEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                if tx.send(GameEvent::Tick(epoch)).is_err() {
                    break;
                }
            }
        });

        Ticker { epoch, handle }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Forwards terminal key presses into the queue until the receiving side
/// goes away.
pub fn spawn_input_listener(tx: UnboundedSender<GameEvent>) -> JoinHandle<io::Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            if !event::poll(INPUT_POLL_INTERVAL)? {
                continue;
            }

            if let Event::Key(ev) = event::read()? {
                if tx.send(GameEvent::Key(ev)).is_err() {
                    break;
                }
            }
        }

        log!("Input listener stopped");
        Ok(())
    })
}
