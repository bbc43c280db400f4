mod apple;
mod board;
mod game;
mod screen;
mod snake;
mod stats;

use std::fs::File;

use anyhow::Result;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<()> {
    // Logs go to a side file: stdout is the game screen. Best-effort, the
    // game runs fine without it.
    if let Ok(file) = File::create("toro-snake.log") {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    let mut game = game::SnakeGame::new()?;
    let result = game.run();

    // Restore the terminal on both the quit path and the error path.
    game.shutdown();
    result
}
