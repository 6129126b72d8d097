use crate::Coords;
use crate::food::generate_food;
use crate::grid::Grid;
use crate::snake::{Snake, Direction::{self, *}};

use rand::Rng;

pub const DEFAULT_DIRECTION: Direction = Right;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cause {
    Wall,
    SelfCollision,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Over(Cause),
    /// The snake fills the board, there is nowhere left to put food
    Won,
}

/// What the display sees in a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Snake,
    Food,
    Empty,
}

/// A complete snapshot of one game. Ticks never modify a state in place,
/// they produce the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Coords,
    pub status: Status,
    start_length: usize,
}

impl GameState {
    /// The initial state of every game: a short snake in the middle of the
    /// board heading right, and fresh food.
    pub fn new<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let length = INITIAL_SNAKE_LENGTH.min(grid.size() as usize / 2 + 1);
        let snake = Snake::new(grid.center(), length, DEFAULT_DIRECTION, grid);
        let food = generate_food(grid, &snake, rng).unwrap_or(grid.center());
        let start_length = snake.len();

        GameState { snake, direction: DEFAULT_DIRECTION, food, status: Status::Playing, start_length }
    }

    pub fn is_game_over(&self) -> bool {
        self.status != Status::Playing
    }

    /// Food eaten so far, counted from the length the snake started with.
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.start_length)
    }

    /// Moves the game forward by one step in `direction`.
    ///
    /// On a collision the returned state is this one with only the status
    /// changed. Eating grows the snake by one and places new food; if no
    /// cell is left for it the game is won.
    pub fn tick<R: Rng + ?Sized>(&self, direction: Direction, grid: &Grid, rng: &mut R) -> GameState {
        if self.is_game_over() {
            return self.clone();
        }

        let new_head = match grid.step(self.snake.head(), direction) {
            Some(pos) => pos,
            None => return self.ended(Status::Over(Cause::Wall)),
        };

        let eating = new_head == self.food;
        if self.snake.collides(new_head, !eating) {
            return self.ended(Status::Over(Cause::SelfCollision));
        }

        let mut snake = self.snake.clone();
        snake.advance(new_head, eating);

        let (food, status) = if eating {
            match generate_food(grid, &snake, rng) {
                Some(food) => (food, Status::Playing),
                None => (self.food, Status::Won),
            }
        } else {
            (self.food, Status::Playing)
        };

        GameState { snake, direction, food, status, start_length: self.start_length }
    }

    pub fn cell_at(&self, pos: Coords) -> Cell {
        if self.snake.contains(pos) {
            Cell::Snake
        } else if self.food == pos {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    fn ended(&self, status: Status) -> GameState {
        GameState { status, ..self.clone() }
    }
}
