//! WebGPU rendering module
//!
//! The world is drawn as flat-colored triangles in playfield coordinates,
//! letterboxed into the canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
