//! WebGPU rendering module
//!
//! Draws the square as two triangles, positioned from a `MotionState`
//! snapshot each tick.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
