use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Position, BORDER_COLOR, SNAKE_COLOR};
use crate::screen::{Draw, Screen};
use Direction::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
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

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Outcome of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Collided,
}

/// The snake: an ordered list of occupied cells, head first. Movement policy
/// is move-then-check: the head is inserted and the tail popped before the
/// self-collision test, so stepping into the cell the tail just left is legal.
pub struct Snake {
    segments: Vec<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    vacated: Option<Position>,
}

impl Snake {
    /// A length-1 snake at the board center, heading right.
    pub fn new() -> Self {
        Snake {
            segments: vec![Position::center()],
            direction: Right,
            pending_direction: None,
            vacated: None,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// The cell the tail left on the latest step, still drawn on screen.
    pub fn vacated(&self) -> Option<Position> {
        self.vacated
    }

    /// Requests a turn for the next step. A 180° reversal of the committed
    /// direction is rejected here rather than at move time.
    pub fn set_pending_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.pending_direction = Some(requested);
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// One movement step: commit the pending turn, push the wrapped new head,
    /// pop the tail, then test the new head against the remaining body.
    pub fn advance(&mut self) -> Advance {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let new_head = self.head().stepped(self.direction.delta());
        self.segments.insert(0, new_head);
        self.vacated = self.segments.pop();

        if self.segments[1..].contains(&new_head) {
            Advance::Collided
        } else {
            Advance::Moved
        }
    }

    /// Grows by one: the cell the tail just vacated becomes a tail segment
    /// again. Called by the game loop when the head lands on the apple.
    pub fn grow(&mut self) {
        if let Some(tail) = self.vacated.take() {
            self.segments.push(tail);
        }
    }

    /// Builds a snake from explicit segments, head first. Test-only seam.
    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Snake { segments, direction, pending_direction: None, vacated: None }
    }

    /// Back to a length-1 snake at the board center. The first game start
    /// uses a fixed rightward direction; post-collision resets randomize it.
    pub fn reset(&mut self, randomize_direction: bool, rng: &mut impl Rng) {
        self.segments = vec![Position::center()];
        self.direction = if randomize_direction {
            *[Up, Down, Left, Right].choose(rng).unwrap_or(&Right)
        } else {
            Right
        };
        self.pending_direction = None;
        self.vacated = None;
    }
}

impl Draw for Snake {
    /// Draws every segment and blanks the cell the tail just left, so only
    /// the delta of a step touches the terminal.
    fn draw(&self, screen: &mut Screen) -> Result<()> {
        for &segment in &self.segments {
            screen.draw_cell(segment, SNAKE_COLOR, BORDER_COLOR)?;
        }
        if let Some(tail) = self.vacated {
            screen.erase_cell(tail)?;
        }
        Ok(())
    }
}
