//! JSON file store in the working directory

use std::path::PathBuf;

use super::{ScoreStore, StoreError, read_json, write_json};
use crate::highscores::HighScoreRecord;

/// Default file name for the high score document
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// Stores `{"high_score": N}` in a file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        let record: HighScoreRecord = read_json(&self.path)?;
        Ok(record.high_score)
    }

    fn save(&mut self, high_score: u64) -> Result<(), StoreError> {
        write_json(&self.path, &HighScoreRecord { high_score })
    }
}
