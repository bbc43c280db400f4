use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::board::{BACKGROUND_COLOR, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH, Position};

// One board cell is rendered as two terminal columns so cells come out
// roughly square.
const CELL_COLUMNS: u16 = 2;

/// Anything the game loop can put on the board.
pub trait Draw {
    fn draw(&self, screen: &mut Screen) -> Result<()>;
}

/// Terminal presentation layer: raw-mode alternate screen where every board
/// cell maps to a fixed pair of character cells.
pub struct Screen {
    stdout: Stdout,
}

impl Screen {
    /// Enters the alternate screen and raw mode. Fails when the terminal is
    /// too small to fit the board.
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        ensure!(
            cols >= GRID_WIDTH as u16 * CELL_COLUMNS && rows >= GRID_HEIGHT as u16,
            "terminal is {}x{}, the board needs at least {}x{}",
            cols,
            rows,
            GRID_WIDTH as u16 * CELL_COLUMNS,
            GRID_HEIGHT
        );

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;

        Ok(Screen { stdout })
    }

    /// Leaves raw mode and the alternate screen. Best-effort: called on the
    /// way out, including error paths.
    pub fn restore(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
    }

    /// Drains every pending key event without blocking.
    pub fn poll_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }
        Ok(events)
    }

    /// Paints one cell as a filled square with a visible border.
    pub fn draw_cell(&mut self, pos: Position, fill: Color, border: Color) -> Result<()> {
        let (col, row) = cell_origin(pos);
        queue!(
            self.stdout,
            cursor::MoveTo(col, row),
            SetForegroundColor(border),
            SetBackgroundColor(fill),
            Print("[]"),
        )?;
        Ok(())
    }

    /// Paints one cell back in the background color.
    pub fn erase_cell(&mut self, pos: Position) -> Result<()> {
        let (col, row) = cell_origin(pos);
        queue!(
            self.stdout,
            cursor::MoveTo(col, row),
            SetBackgroundColor(BACKGROUND_COLOR),
            Print("  "),
        )?;
        Ok(())
    }

    /// Wipes the whole board to the background color.
    pub fn clear(&mut self) -> Result<()> {
        execute!(
            self.stdout,
            SetBackgroundColor(BACKGROUND_COLOR),
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    /// Pushes all queued drawing to the terminal.
    pub fn present(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn cell_origin(pos: Position) -> (u16, u16) {
    (
        (pos.x / GRID_SIZE) as u16 * CELL_COLUMNS,
        (pos.y / GRID_SIZE) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_origin_maps_pixels_to_character_cells() {
        assert_eq!(cell_origin(Position::new(0, 0)), (0, 0));
        assert_eq!(cell_origin(Position::new(320, 240)), (32, 12));
        assert_eq!(cell_origin(Position::new(620, 460)), (62, 23));
    }
}
