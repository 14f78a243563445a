//! Bouncer - a square bouncing around a screen-sized canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion state, edge reflection, gestures)
//! - `platform`: Host plumbing (scoped teardown, gesture recognition, pacing)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Tunables with JSON persistence

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ReflectionMode, Settings};
pub use sim::{Bouncer, Gesture, MotionState};

/// Simulation configuration constants
pub mod consts {
    /// Nominal timer interval in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 16;
    /// Maximum ticks a host may run to catch up after a stall
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Side length of the square in canvas units
    pub const SQUARE_SIZE: f32 = 50.0;
    /// Speed the square starts with
    pub const INITIAL_SPEED: u32 = 2;
    /// Long-press never slows the square below this
    pub const MIN_SPEED: u32 = 1;
    /// Canvas units moved per tick per unit of speed
    pub const STEP_PER_SPEED: f32 = 2.0;

    /// Hold duration that turns a press into a long-press
    pub const LONG_PRESS_MS: u32 = 500;
    /// Shortest long-press threshold settings may ask for
    pub const MIN_LONG_PRESS_MS: u32 = 100;
}
