use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::GridInt;
use crate::grid::{Grid, Walls};

#[derive(Parser, Debug, Clone)]
#[command(name = "grid_snake", about = "Snake on a square grid in your terminal")]
pub struct Options {
    /// Side length of the board, in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(3..=64))]
    pub grid_size: GridInt,

    /// Milliseconds between two moves of the snake
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(20..=5000))]
    pub tick_ms: u64,

    /// Whether the board edges wrap around or kill the snake
    #[arg(long, value_enum, default_value_t = Walls::Wrap)]
    pub walls: Walls,

    /// Let the snake turn straight back into itself
    #[arg(long)]
    pub allow_reversal: bool,

    /// Append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Options {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size, self.walls)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
