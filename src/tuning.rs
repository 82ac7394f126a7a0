//! Data-driven game balance
//!
//! Defaults reproduce the classic feel; a `tuning.json` next to the binary
//! can override any field.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence;

/// Gameplay knobs read by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Board width in cells
    pub grid_width: i32,
    /// Board height in cells
    pub grid_height: i32,
    /// Tick interval at the start of a run (ms)
    pub initial_speed_ms: u32,
    /// Fastest tick interval (ms)
    pub min_speed_ms: u32,
    /// Interval reduction per food (ms)
    pub speed_step_ms: u32,
    /// Score per food
    pub points_per_food: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            points_per_food: POINTS_PER_FOOD,
        }
    }
}

/// Why a tuning was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    /// The starting body does not fit on the board
    GridTooSmall { width: i32, height: i32 },
    /// Interval must be positive
    ZeroSpeed,
    /// Floor is slower than the starting interval
    FloorAboveInitial { min: u32, initial: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} cannot hold the starting snake")
            }
            TuningError::ZeroSpeed => write!(f, "tick interval must be positive"),
            TuningError::FloorAboveInitial { min, initial } => {
                write!(f, "speed floor {min}ms is above the initial {initial}ms")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check the tuning can host a game
    pub fn validate(&self) -> Result<(), TuningError> {
        let fits = INITIAL_BODY
            .iter()
            .all(|&(x, y)| x < self.grid_width && y < self.grid_height);
        // Leave at least one free cell in front of the head
        let (hx, _) = INITIAL_BODY[0];
        if !fits || hx + 1 >= self.grid_width {
            return Err(TuningError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.min_speed_ms == 0 {
            return Err(TuningError::ZeroSpeed);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(TuningError::FloorAboveInitial {
                min: self.min_speed_ms,
                initial: self.initial_speed_ms,
            });
        }
        Ok(())
    }

    /// Interval after one more food, never below the floor
    pub fn next_speed(&self, current_ms: u32) -> u32 {
        current_ms
            .saturating_sub(self.speed_step_ms)
            .max(self.min_speed_ms)
    }

    /// Load `path`, falling back to defaults when missing, corrupt or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let tuning = match persistence::read_json::<Tuning>(path) {
            Ok(tuning) => tuning,
            Err(e) if e.is_not_found() => {
                log::debug!("No tuning file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match tuning.validate() {
            Ok(()) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_next_speed_floors() {
        let tuning = Tuning::default();
        assert_eq!(tuning.next_speed(150), 148);
        assert_eq!(tuning.next_speed(82), 80);
        assert_eq!(tuning.next_speed(80), 80);
        assert_eq!(tuning.next_speed(81), 80);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let tuning = Tuning {
            grid_width: 6,
            grid_height: 20,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_floor_above_initial() {
        let tuning = Tuning {
            min_speed_ms: 200,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::FloorAboveInitial { .. })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"points_per_food": 25}"#).unwrap();
        assert_eq!(tuning.points_per_food, 25);
        assert_eq!(tuning.initial_speed_ms, INITIAL_SPEED_MS);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tuning = Tuning::load_or_default("definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
