use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use log::warn;

/// Append-only record of finished games. Write failures are reported to the
/// log and otherwise swallowed so they never interrupt play.
pub struct StatsLog {
    path: PathBuf,
}

impl StatsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StatsLog { path: path.into() }
    }

    /// Appends one line with the local time and the snake's final length.
    pub fn record(&self, length: usize) {
        let stamp = Local::now().format("%d-%m-%Y %H:%M");
        let line = format!("Game over: {stamp}, snake length {length}.\n");

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(err) = result {
            warn!("could not append to {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn records_append_with_length_and_timestamp() {
        let path = std::env::temp_dir().join(format!("stats-{}.txt", std::process::id()));
        let _ = fs::remove_file(&path);

        let stats = StatsLog::new(&path);
        stats.record(7);
        stats.record(12);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("snake length 7."));
        assert!(lines[1].contains("snake length 12."));
        // DD-MM-YYYY HH:MM stamp.
        assert!(lines[0].starts_with("Game over: "));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let stats = StatsLog::new("/nonexistent-dir/stats.txt");
        stats.record(3);
    }
}
