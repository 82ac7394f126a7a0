//! Browser LocalStorage store (web only)

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ScoreStore, StoreError};
use crate::highscores::HighScoreRecord;

fn storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or_else(|| StoreError::Unavailable("LocalStorage".into()))
}

/// Read a JSON document stored under `key`. A missing key reads as `None`.
pub fn get_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StoreError> {
    let storage = storage()?;
    let json = storage
        .get_item(key)
        .map_err(|_| StoreError::Unavailable(format!("read of {key}")))?;
    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Store a JSON document under `key`
pub fn set_json<T: Serialize>(key: &str, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    storage()?
        .set_item(key, &json)
        .map_err(|_| StoreError::Unavailable(format!("write of {key}")))
}

/// High score kept in LocalStorage as `{"high_score": N}`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const HIGH_SCORE_KEY: &'static str = "snake_2025_high_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        Ok(get_json::<HighScoreRecord>(&self.key)?
            .map(|r| r.high_score)
            .unwrap_or(0))
    }

    fn save(&mut self, high_score: u64) -> Result<(), StoreError> {
        set_json(&self.key, &HighScoreRecord { high_score })
    }
}
