use crossterm::style::Color;
use rand::Rng;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const GRID_SIZE: i32 = 20;
pub const GRID_WIDTH: i32 = SCREEN_WIDTH / GRID_SIZE;
pub const GRID_HEIGHT: i32 = SCREEN_HEIGHT / GRID_SIZE;

/// Game updates per second.
pub const SPEED: u32 = 20;

pub const BACKGROUND_COLOR: Color = Color::Rgb { r: 0, g: 0, b: 0 };
pub const BORDER_COLOR: Color = Color::Rgb { r: 93, g: 216, b: 228 };
pub const APPLE_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const SNAKE_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };

/// A cell on the board, in pixel coordinates. Both components are always
/// multiples of `GRID_SIZE`. The board is toroidal: stepping off one edge
/// re-enters on the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The center cell of the board.
    pub fn center() -> Self {
        Position { x: SCREEN_WIDTH / 2, y: SCREEN_HEIGHT / 2 }
    }

    /// A uniformly random cell within board bounds.
    pub fn random_cell(rng: &mut impl Rng) -> Self {
        Position {
            x: rng.gen_range(0..GRID_WIDTH) * GRID_SIZE,
            y: rng.gen_range(0..GRID_HEIGHT) * GRID_SIZE,
        }
    }

    /// The neighboring cell one step away, wrapped per axis.
    pub fn stepped(self, delta: (i32, i32)) -> Self {
        Position {
            x: (self.x + delta.0 * GRID_SIZE).rem_euclid(SCREEN_WIDTH),
            y: (self.y + delta.1 * GRID_SIZE).rem_euclid(SCREEN_HEIGHT),
        }
    }
}

/// Every cell of the grid, row by row.
pub fn all_cells() -> impl Iterator<Item = Position> {
    (0..GRID_HEIGHT).flat_map(|row| {
        (0..GRID_WIDTH).map(move |col| Position::new(col * GRID_SIZE, row * GRID_SIZE))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn center_is_grid_aligned() {
        let center = Position::center();
        assert_eq!(center, Position::new(320, 240));
        assert_eq!(center.x % GRID_SIZE, 0);
        assert_eq!(center.y % GRID_SIZE, 0);
    }

    #[test]
    fn random_cells_stay_aligned_and_in_bounds() {
        let mut rng = thread_rng();
        for _ in 0..200 {
            let pos = Position::random_cell(&mut rng);
            assert_eq!(pos.x % GRID_SIZE, 0);
            assert_eq!(pos.y % GRID_SIZE, 0);
            assert!((0..SCREEN_WIDTH).contains(&pos.x));
            assert!((0..SCREEN_HEIGHT).contains(&pos.y));
        }
    }

    #[test]
    fn stepping_wraps_on_both_axes() {
        let right_edge = Position::new(SCREEN_WIDTH - GRID_SIZE, 240);
        assert_eq!(right_edge.stepped((1, 0)), Position::new(0, 240));
        assert_eq!(Position::new(0, 240).stepped((-1, 0)), right_edge);

        let bottom_edge = Position::new(320, SCREEN_HEIGHT - GRID_SIZE);
        assert_eq!(bottom_edge.stepped((0, 1)), Position::new(320, 0));
        assert_eq!(Position::new(320, 0).stepped((0, -1)), bottom_edge);
    }

    #[test]
    fn interior_steps_do_not_wrap() {
        let pos = Position::new(320, 240);
        assert_eq!(pos.stepped((1, 0)), Position::new(340, 240));
        assert_eq!(pos.stepped((0, -1)), Position::new(320, 220));
    }

    #[test]
    fn all_cells_covers_the_grid_once() {
        let cells: Vec<_> = all_cells().collect();
        assert_eq!(cells.len(), (GRID_WIDTH * GRID_HEIGHT) as usize);
        assert!(cells.contains(&Position::new(0, 0)));
        assert!(cells.contains(&Position::new(
            SCREEN_WIDTH - GRID_SIZE,
            SCREEN_HEIGHT - GRID_SIZE
        )));
    }
}
