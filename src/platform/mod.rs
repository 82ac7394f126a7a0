//! Platform abstraction layer
//!
//! Shared by the web and terminal front ends:
//! - Time/ticks (`TickTimer`)
//! - Input events (`Key` → `Input`)

pub mod input;
pub mod timer;

pub use input::{Key, map_key};
pub use timer::TickTimer;
