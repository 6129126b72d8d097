use crate::{Coords, GridInt};
use crate::snake::Direction::{self, *};

use clap::ValueEnum;

/// What happens when the head crosses the edge of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Walls {
    /// Leave on one side, come back on the opposite one
    Wrap,
    /// Touching the edge ends the game
    Solid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: GridInt,
    walls: Walls,
}

impl Grid {
    pub fn new(size: GridInt, walls: Walls) -> Self {
        Grid { size, walls }
    }

    pub fn size(&self) -> GridInt {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.size && pos.1 < self.size
    }

    pub fn center(&self) -> Coords {
        (self.size / 2, self.size / 2)
    }

    /// Row-major iterator over every cell of the board.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    /// The cell one step away from `pos`, or `None` if the step leaves a
    /// board with solid walls.
    pub fn step(&self, pos: Coords, direction: Direction) -> Option<Coords> {
        let (x, y) = pos;

        match self.walls {
            Walls::Wrap => Some(match direction {
                Up => (x, wrapping_dec(y, self.size)),
                Down => (x, wrapping_inc(y, self.size)),
                Left => (wrapping_dec(x, self.size), y),
                Right => (wrapping_inc(x, self.size), y),
            }),
            Walls::Solid => {
                let next = match direction {
                    Up => (Some(x), y.checked_sub(1)),
                    Down => (Some(x), y.checked_add(1)),
                    Left => (x.checked_sub(1), Some(y)),
                    Right => (x.checked_add(1), Some(y)),
                };

                match next {
                    (Some(x), Some(y)) if self.contains((x, y)) => Some((x, y)),
                    _ => None,
                }
            }
        }
    }
}

fn wrapping_inc(value: GridInt, max: GridInt) -> GridInt {
    if value + 1 >= max { 0 } else { value + 1 }
}

fn wrapping_dec(value: GridInt, max: GridInt) -> GridInt {
    if value == 0 { max - 1 } else { value - 1 }
}
