//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timer ticks arrive as `Input::Tick`; no clocks in here
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use collision::{Collision, check_collision};
pub use food::{free_cells, place_food};
pub use grid::{Cell, Direction, Grid};
pub use snake::Snake;
pub use state::{GamePhase, GameState};
pub use tick::{GameEvent, Input, Transition, step, transition};
