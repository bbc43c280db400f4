use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{self, Position, APPLE_COLOR, BORDER_COLOR};
use crate::screen::{Draw, Screen};
use crate::snake::Snake;

// Rejection-sampling attempts before falling back to enumerating free cells.
const PLACEMENT_ATTEMPTS: u32 = 32;

/// The apple occupies a single cell and jumps to a fresh one when eaten.
pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn new(rng: &mut impl Rng) -> Self {
        Apple { position: Position::random_cell(rng) }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the apple to a uniformly random cell, with no regard for the
    /// snake. Callers that need a free cell use `relocate_avoiding`.
    pub fn relocate(&mut self, rng: &mut impl Rng) {
        self.position = Position::random_cell(rng);
    }

    /// Moves the apple to a random cell outside the snake. Samples a bounded
    /// number of times, then picks among the enumerated free cells so a
    /// nearly full board still terminates. Returns false when the snake
    /// covers the whole board and no cell is left.
    pub fn relocate_avoiding(&mut self, snake: &Snake, rng: &mut impl Rng) -> bool {
        for _ in 0..PLACEMENT_ATTEMPTS {
            self.relocate(rng);
            if !snake.occupies(self.position) {
                return true;
            }
        }

        let free: Vec<Position> = board::all_cells()
            .filter(|cell| !snake.occupies(*cell))
            .collect();
        match free.choose(rng) {
            Some(cell) => {
                self.position = *cell;
                true
            }
            None => false,
        }
    }
}

impl Draw for Apple {
    fn draw(&self, screen: &mut Screen) -> Result<()> {
        screen.draw_cell(self.position, APPLE_COLOR, BORDER_COLOR)
    }
}
