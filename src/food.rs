use crate::Coords;
use crate::grid::Grid;
use crate::snake::Snake;

use rand::Rng;
use rand::seq::IteratorRandom;

const MAX_REROLLS: usize = 100;

/// A uniformly random cell anywhere on the board.
pub fn random_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Coords {
    let x = rng.gen_range(0..grid.size());
    let y = rng.gen_range(0..grid.size());
    (x, y)
}

/// Picks a cell for the next piece of food, never under the snake. Returns
/// `None` once the snake covers the whole board.
pub fn generate_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Coords> {
    if snake.len() >= grid.cell_count() {
        return None;
    }

    for _ in 0..MAX_REROLLS {
        let pos = random_cell(grid, rng);
        if !snake.contains(pos) {
            return Some(pos);
        }
    }

    // Crowded board, pick among what is left
    grid.cells().filter(|pos| !snake.contains(*pos)).choose(rng)
}
