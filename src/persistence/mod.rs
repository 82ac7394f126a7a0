//! Persistence backends
//!
//! Features:
//! - `ScoreStore` collaborator used by the core to load/save the high score
//! - JSON file store (native, working directory)
//! - LocalStorage store (web)
//! - In-memory store with failure injection (tests, headless runs)
//!
//! Every failure is reported as a `StoreError`; callers decide whether to
//! swallow it. The game always does.

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// A storage operation failed
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    Io(io::Error),
    /// Stored data is not the expected JSON document
    Corrupt(serde_json::Error),
    /// No storage available on this platform (e.g. LocalStorage disabled)
    Unavailable(String),
}

impl StoreError {
    /// Nothing has been saved yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O failed: {e}"),
            StoreError::Corrupt(e) => write!(f, "stored data is corrupt: {e}"),
            StoreError::Unavailable(what) => write!(f, "storage unavailable: {what}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Corrupt(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e)
    }
}

/// Storage collaborator for the persisted high score
pub trait ScoreStore {
    /// Read the stored high score
    fn load(&mut self) -> Result<u64, StoreError>;
    /// Replace the stored high score
    fn save(&mut self, high_score: u64) -> Result<(), StoreError>;
}

/// Read a JSON document from disk
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a JSON document, going through a temp file so a crash mid-write
/// never leaves a truncated document behind
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// In-memory store. Records every save; can be told to fail.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub value: Option<u64>,
    pub fail_loads: bool,
    pub fail_saves: bool,
    /// Every value passed to `save`, including failed attempts
    pub saves: Vec<u64>,
}

impl MemoryStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        if self.fail_loads {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, high_score: u64) -> Result<(), StoreError> {
        self.saves.push(high_score);
        if self.fail_saves {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        self.value = Some(high_score);
        Ok(())
    }
}

/// The platform's default high score store
pub fn default_store() -> Box<dyn ScoreStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorageStore::new(LocalStorageStore::HIGH_SCORE_KEY))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(JsonFileStore::new(file::HIGH_SCORE_FILE))
    }
}
