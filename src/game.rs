use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use rand::rngs::ThreadRng;

use crate::apple::Apple;
use crate::board::SPEED;
use crate::screen::{Draw, Screen};
use crate::snake::{Advance, Direction, Snake};
use crate::stats::StatsLog;

const STATS_FILE: &str = "statistic.txt";

/// What a key event means to the game, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Turn(Direction),
}

/// Owns every entity and runs the fixed-rate tick loop. There are no module
/// globals: screen, RNG, and entities all live here and are threaded through
/// by reference.
pub struct SnakeGame {
    screen: Screen,
    rng: ThreadRng,
    snake: Snake,
    apple: Apple,
    stats: StatsLog,
}

impl SnakeGame {
    pub fn new() -> Result<Self> {
        let screen = Screen::new()?;
        let mut rng = rand::thread_rng();
        let snake = Snake::new();
        let mut apple = Apple::new(&mut rng);
        apple.relocate_avoiding(&snake, &mut rng);

        Ok(SnakeGame {
            screen,
            rng,
            snake,
            apple,
            stats: StatsLog::new(STATS_FILE),
        })
    }

    /// The tick loop: rate limit, drain input, advance, consume, render.
    /// Returns when a quit key is seen.
    pub fn run(&mut self) -> Result<()> {
        self.screen.clear()?;
        self.render()?;

        let mut clock = TickClock::new(SPEED);
        loop {
            clock.wait();

            for key in self.screen.poll_events()? {
                match interpret(&key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Turn(dir)) => self.snake.set_pending_direction(dir),
                    None => {}
                }
            }

            match self.snake.advance() {
                Advance::Collided => self.finish_round("self-collision")?,
                Advance::Moved => {
                    if self.snake.head() == self.apple.position() {
                        self.consume_apple()?;
                    }
                }
            }

            self.render()?;
        }
    }

    /// Puts the terminal back in order. Safe to call after a failed run.
    pub fn shutdown(&mut self) {
        self.screen.restore();
    }

    fn consume_apple(&mut self) -> Result<()> {
        self.snake.grow();
        info!("apple eaten, snake length {}", self.snake.len());

        // No free cell left means the snake covers the board.
        if !self.apple.relocate_avoiding(&self.snake, &mut self.rng) {
            self.finish_round("board filled")?;
        }
        Ok(())
    }

    /// Records the final length, resets the snake with a random heading, and
    /// starts over on a blank board.
    fn finish_round(&mut self, reason: &str) -> Result<()> {
        info!("round over ({reason}), snake length {}", self.snake.len());
        self.stats.record(self.snake.len());

        self.snake.reset(true, &mut self.rng);
        if self.snake.occupies(self.apple.position()) {
            self.apple.relocate_avoiding(&self.snake, &mut self.rng);
        }
        self.screen.clear()
    }

    fn render(&mut self) -> Result<()> {
        self.snake.draw(&mut self.screen)?;
        self.apple.draw(&mut self.screen)?;
        self.screen.present()
    }
}

fn interpret(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('w') => Some(Action::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Action::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Action::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::Turn(Direction::Right)),
        _ => None,
    }
}

/// Blocking rate limiter: sleeps away whatever is left of each tick budget.
struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second;
        TickClock { period, next: Instant::now() + period }
    }

    fn wait(&mut self) {
        if let Some(budget) = self.next.checked_duration_since(Instant::now()) {
            sleep(budget);
        }
        self.next += self.period;

        // A stall longer than a tick resyncs instead of bursting to catch up.
        let now = Instant::now();
        if self.next < now {
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrow_and_wasd_keys_map_to_turns() {
        assert_eq!(interpret(&press(KeyCode::Up)), Some(Action::Turn(Direction::Up)));
        assert_eq!(interpret(&press(KeyCode::Char('s'))), Some(Action::Turn(Direction::Down)));
        assert_eq!(interpret(&press(KeyCode::Left)), Some(Action::Turn(Direction::Left)));
        assert_eq!(interpret(&press(KeyCode::Char('d'))), Some(Action::Turn(Direction::Right)));
    }

    #[test]
    fn quit_keys_are_recognized() {
        assert_eq!(interpret(&press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(interpret(&press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            interpret(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        assert_eq!(interpret(&press(KeyCode::Char('x'))), None);
        assert_eq!(interpret(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(interpret(&release), None);
    }

    #[test]
    fn tick_clock_spends_the_frame_budget() {
        let mut clock = TickClock::new(100);
        let start = Instant::now();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
