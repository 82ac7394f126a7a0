//! WebGPU rendering module
//!
//! The scene is built on the CPU as a flat-colored triangle list in window
//! pixels and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use scene::{build_scene, logical_size};
pub use vertex::Vertex;
