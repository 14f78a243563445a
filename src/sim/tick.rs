//! Fixed-step motion tick and gesture transitions
//!
//! The step is the same every tick regardless of how much wall time passed,
//! so a run is a pure function of seed, gestures and tick count.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{ReflectionMode, move_axis};
use super::state::{CanvasSize, MotionState, Rgb};
use crate::consts::*;

/// Recognized touch gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    /// Pause/resume toggle
    Tap,
    /// Slow down by one step
    LongPress,
}

/// Which axes reflected during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub reflected_x: bool,
    pub reflected_y: bool,
}

impl TickOutcome {
    pub fn any(&self) -> bool {
        self.reflected_x || self.reflected_y
    }
}

/// Advance the square by one fixed step
///
/// Paused states are left untouched and do not consume randomness.
pub fn tick<R: Rng>(state: &mut MotionState, mode: ReflectionMode, rng: &mut R) -> TickOutcome {
    if state.paused {
        return TickOutcome::default();
    }

    let step = STEP_PER_SPEED * state.speed as f32;

    let x = move_axis(state.pos.x, state.dir_x, step, state.size, state.canvas.width, mode);
    let y = move_axis(state.pos.y, state.dir_y, step, state.size, state.canvas.height, mode);

    // Color rolls in axis order so a seeded run is reproducible
    if x.reflected {
        state.color = Rgb::random(rng);
    }
    if y.reflected {
        state.color = Rgb::random(rng);
    }

    state.pos.x = x.pos;
    state.pos.y = y.pos;
    state.dir_x = x.dir;
    state.dir_y = y.dir;

    TickOutcome {
        reflected_x: x.reflected,
        reflected_y: y.reflected,
    }
}

/// Toggle pause
pub fn on_tap(state: &mut MotionState) {
    state.paused = !state.paused;
}

/// Drop speed by one, never below [`MIN_SPEED`]
pub fn on_long_press(state: &mut MotionState) {
    if state.speed > MIN_SPEED {
        state.speed -= 1;
    }
}

/// Record a new canvas size; the square is not moved
pub fn on_resize(state: &mut MotionState, canvas: CanvasSize) {
    state.canvas = canvas;
}

/// Route a gesture to its handler
pub fn apply_gesture(state: &mut MotionState, gesture: Gesture) {
    match gesture {
        Gesture::Tap => on_tap(state),
        Gesture::LongPress => on_long_press(state),
    }
}
