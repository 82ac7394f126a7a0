//! High score tracking
//!
//! A single best score, persisted through a `ScoreStore`. Storage failures
//! never reach the player: a failed load reads as 0 and a failed save is
//! logged and dropped. The in-memory value is authoritative for the session.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// On-disk/LocalStorage document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Best score of all sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Load from `store`; anything but a clean read counts as no high score
    pub fn load(store: &mut dyn ScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load high score ({}), starting at 0", e);
                Self::default()
            }
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn submit(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.save(score) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_defaults_to_zero_on_failure() {
        let mut store = MemoryStore::with_value(30);
        store.fail_loads = true;
        assert_eq!(HighScore::load(&mut store).best(), 0);
    }

    #[test]
    fn test_load_reads_store() {
        let mut store = MemoryStore::with_value(30);
        assert_eq!(HighScore::load(&mut store).best(), 30);
    }

    #[test]
    fn test_submit_only_saves_improvements() {
        let mut store = MemoryStore::with_value(30);
        let mut hs = HighScore::load(&mut store);

        assert!(!hs.submit(30, &mut store));
        assert!(!hs.submit(10, &mut store));
        assert!(store.saves.is_empty());

        assert!(hs.submit(50, &mut store));
        assert_eq!(hs.best(), 50);
        assert_eq!(store.saves, vec![50]);
    }

    #[test]
    fn test_save_failure_keeps_memory_value() {
        let mut store = MemoryStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut hs = HighScore::load(&mut store);
        assert!(hs.submit(70, &mut store));
        assert_eq!(hs.best(), 70);
        assert_eq!(store.value, None);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_string(&HighScoreRecord { high_score: 50 }).unwrap();
        assert_eq!(json, r#"{"high_score":50}"#);
    }
}
