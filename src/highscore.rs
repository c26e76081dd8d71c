//! Highscore persistence
//!
//! One JSON object `{"highscore": <n>}` on disk. All I/O failures are
//! non-fatal: a missing or malformed file reads as zero, and a failed write
//! is logged and swallowed so gameplay is never interrupted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Highscore file in the user's home directory
const FILE_NAME: &str = ".gesture_invaders_highscore.json";

/// On-disk shape of the highscore file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighscoreFile {
    highscore: u64,
}

/// Best score across sessions, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Highscore {
    path: PathBuf,
    best: u64,
}

impl Highscore {
    /// Load from the default location (`~/.gesture_invaders_highscore.json`).
    pub fn load_default() -> Self {
        let path = std::env::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(FILE_NAME);
        Self::load_from(path)
    }

    /// Load from an explicit path (tests point this at a scratch file).
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_file(&path);
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run; persists only when the score beats the best.
    pub fn submit(&mut self, score: u64) {
        if score > self.best {
            self.best = score;
            self.save();
        }
    }

    /// Write the current best to disk. Failures are logged and swallowed.
    pub fn save(&self) {
        let file = HighscoreFile {
            highscore: self.best,
        };
        let json = match serde_json::to_string(&file) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not encode highscore: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("could not write highscore to {}: {err}", self.path.display());
        } else {
            log::info!("highscore saved: {}", self.best);
        }
    }
}

fn read_file(path: &Path) -> u64 {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<HighscoreFile>(&json) {
            Ok(file) => file.highscore,
            Err(err) => {
                log::warn!("malformed highscore file {}: {err}", path.display());
                0
            }
        },
        Err(_) => 0, // Missing file is the normal first-run case
    }
}
