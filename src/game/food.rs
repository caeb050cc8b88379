use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::snake::Snake;
use super::state::Position;

/// Rejected explicit food placement
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("position ({0}, {1}) is outside the arena")]
    OutOfBounds(i32, i32),
    #[error("position ({0}, {1}) is occupied by the snake")]
    Occupied(i32, i32),
}

/// A single piece of food, never coincident with a snake segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Spawn food at a uniformly random free cell. Returns None only when
    /// the snake occupies the whole arena.
    pub fn spawn<R: Rng>(rng: &mut R, snake: &Snake, width: usize, height: usize) -> Option<Self> {
        let position = random_free_cell(rng, snake, width, height)?;
        Some(Self { position })
    }

    /// Place food at an explicit position, validating arena bounds and
    /// disjointness from the snake.
    pub fn place(
        position: Position,
        snake: &Snake,
        width: usize,
        height: usize,
    ) -> Result<Self, PlacementError> {
        if !position.is_in_bounds(width, height) {
            return Err(PlacementError::OutOfBounds(position.x, position.y));
        }
        if snake.occupies(position) {
            return Err(PlacementError::Occupied(position.x, position.y));
        }
        Ok(Self { position })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a uniformly random cell not occupied by the snake.
    /// Returns false, leaving the position unchanged, when no free cell
    /// remains (the arena-full terminal condition, not an error).
    pub fn relocate<R: Rng>(
        &mut self,
        rng: &mut R,
        snake: &Snake,
        width: usize,
        height: usize,
    ) -> bool {
        match random_free_cell(rng, snake, width, height) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}

/// Uniform choice among the arena cells the snake does not occupy
fn random_free_cell<R: Rng>(
    rng: &mut R,
    snake: &Snake,
    width: usize,
    height: usize,
) -> Option<Position> {
    let mut free = Vec::with_capacity(width * height - snake.len().min(width * height));

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let candidate = Position::new(x, y);
            if !snake.occupies(candidate) {
                free.push(candidate);
            }
        }
    }

    free.choose(rng).copied()
}
