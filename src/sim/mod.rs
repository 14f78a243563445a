//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick step only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bouncer;
pub mod collision;
pub mod state;
pub mod tick;

pub use bouncer::Bouncer;
pub use collision::{AxisMove, ReflectionMode, crosses_edge, move_axis};
pub use state::{CanvasSize, MotionState, Rgb, Sign};
pub use tick::{Gesture, TickOutcome, apply_gesture, on_long_press, on_resize, on_tap, tick};
