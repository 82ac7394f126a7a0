//! Snake 2025 - A modern single-screen Snake
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, collisions, state machine)
//! - `persistence`: High score / settings storage backends
//! - `highscores`: Best-score tracking on top of a `ScoreStore`
//! - `tuning`: Data-driven game balance
//! - `effects`: Cosmetic particles, head trail and food pulse
//! - `ui`: Button layout and pointer hit-testing
//! - `platform`: Tick timer and key mapping shared by the front ends
//! - `renderer`: WebGPU rendering pipeline and CPU scene builder
//! - `session`: Simulation plus store, timer, effects and audio, as driven by a front end

pub mod audio;
pub mod effects;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window size in logical pixels
    pub const WINDOW_WIDTH: f32 = 900.0;
    pub const WINDOW_HEIGHT: f32 = 700.0;
    /// Height of the HUD bar above the board
    pub const HUD_HEIGHT: f32 = 100.0;
    /// Size of one grid cell in pixels
    pub const CELL_SIZE: f32 = 25.0;

    /// Board dimensions in cells (HUD bar is reserved)
    pub const GRID_WIDTH: i32 = (WINDOW_WIDTH / CELL_SIZE) as i32;
    pub const GRID_HEIGHT: i32 = ((WINDOW_HEIGHT - HUD_HEIGHT) / CELL_SIZE) as i32;

    /// Tick interval at the start of a run (ms)
    pub const INITIAL_SPEED_MS: u32 = 150;
    /// Fastest allowed tick interval (ms)
    pub const MIN_SPEED_MS: u32 = 80;
    /// Interval reduction per food eaten (ms)
    pub const SPEED_STEP_MS: u32 = 2;
    /// Points per food
    pub const POINTS_PER_FOOD: u64 = 10;

    /// Starting body, head first
    pub const INITIAL_BODY: [(i32, i32); 3] = [(5, 10), (4, 10), (3, 10)];
}
