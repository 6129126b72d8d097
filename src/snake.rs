use std::collections::VecDeque;

use crate::Coords;
use crate::grid::Grid;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// The snake's body, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// Builds a snake of `size` segments with its head on `pos`, the rest of
    /// the body trailing behind it so that it can keep moving in `direction`.
    /// Segments that would fall off the board are not created.
    pub fn new(pos: Coords, size: usize, direction: Direction, grid: &Grid) -> Self {
        let mut body = VecDeque::with_capacity(size.max(1));
        body.push_back(pos);

        let behind = direction.opposite();
        let mut last = pos;
        for _ in 1..size {
            match grid.step(last, behind) {
                Some(next) if !body.contains(&next) => {
                    body.push_back(next);
                    last = next;
                }
                _ => break,
            }
        }

        Snake { body }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Whether moving the head onto `pos` runs into the body. When the tail
    /// is being vacated on the same move, its cell is free, unless it is the
    /// segment right behind the head: turning back onto it always collides.
    pub fn collides(&self, pos: Coords, tail_vacates: bool) -> bool {
        if self.body.len() > 1 && self.body[1] == pos {
            return true;
        }

        let checked = if tail_vacates { self.body.len() - 1 } else { self.body.len() };
        self.body.iter().take(checked).any(|segment| *segment == pos)
    }

    /// Puts a new head in front. Unless growing, the tail is dropped and
    /// returned.
    pub fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}
