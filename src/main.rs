mod food;
mod game;
mod grid;
mod input;
mod logger;
mod options;
mod scheduler;
mod session;
mod snake;
mod state;
mod term;

use anyhow::{Context, Result};
use clap::Parser;

pub type GridInt = u16;
pub type Coords = (GridInt, GridInt);

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let options = options::Options::parse();

    logger::init_logger(options.log_file.as_deref())
        .with_context(|| format!("cannot open log file {:?}", options.log_file))?;
    log!("Starting with {:?}", options);

    let term = term::TermManager::new().context("cannot read terminal size")?;
    let mut game = game::SnakeGame::new(&options, term)?;

    // The terminal has to come back even if the game failed
    let res = game.run().await;
    game.term().restore().context("cannot restore terminal")?;

    res.context("terminal error")?;
    log!("Bye");
    Ok(())
}
