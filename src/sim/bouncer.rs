//! The bouncing-square component
//!
//! Owns the motion state and the seeded RNG used for color rolls. Hosts
//! drive it with [`Bouncer::tick`] from their timer and feed it gestures and
//! canvas size changes as they arrive.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::ReflectionMode;
use super::state::{CanvasSize, MotionState};
use super::tick::{self, Gesture, TickOutcome};
use crate::settings::Settings;

pub struct Bouncer {
    state: MotionState,
    rng: Pcg32,
    seed: u64,
    mode: ReflectionMode,
    ticks: u64,
}

impl Bouncer {
    /// Mount a new square at a random position inside `canvas`
    pub fn new(canvas: CanvasSize, settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = MotionState::new(canvas, settings.square_size, settings.initial_speed, &mut rng);
        log::info!(
            "Bouncer mounted at ({}, {}) on {}x{} canvas, seed {}",
            state.pos.x,
            state.pos.y,
            canvas.width,
            canvas.height,
            seed
        );
        Self {
            state,
            rng,
            seed,
            mode: settings.reflection,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks that actually moved the square
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timer callback
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.paused {
            return TickOutcome::default();
        }
        self.ticks += 1;
        let outcome = tick::tick(&mut self.state, self.mode, &mut self.rng);
        if outcome.any() {
            log::debug!(
                "Reflected (x: {}, y: {}) at ({:.1}, {:.1}), color {}",
                outcome.reflected_x,
                outcome.reflected_y,
                self.state.pos.x,
                self.state.pos.y,
                self.state.color.to_hex()
            );
        }
        outcome
    }

    pub fn on_resize(&mut self, canvas: CanvasSize) {
        if canvas != self.state.canvas {
            log::info!("Canvas resized to {}x{}", canvas.width, canvas.height);
        }
        tick::on_resize(&mut self.state, canvas);
    }

    /// Single entry point for recognized gestures
    pub fn handle(&mut self, gesture: Gesture) {
        tick::apply_gesture(&mut self.state, gesture);
        match gesture {
            Gesture::Tap => {
                log::info!("{}", if self.state.paused { "Paused" } else { "Resumed" })
            }
            Gesture::LongPress => log::info!("Speed now {}", self.state.speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bouncer(seed: u64) -> Bouncer {
        Bouncer::new(CanvasSize::new(400.0, 800.0), &Settings::default(), seed)
    }

    #[test]
    fn test_mount_defaults() {
        let b = bouncer(42);
        let state = b.state();
        assert_eq!(state.speed, 2);
        assert!(!state.paused);
        assert_eq!(state.size, 50.0);
        assert!(state.in_bounds());
        assert_eq!(b.seed(), 42);
    }

    #[test]
    fn test_paused_bouncer_does_not_move() {
        let mut b = bouncer(9);
        b.handle(Gesture::Tap);
        let before = b.state().clone();
        for _ in 0..100 {
            b.tick();
        }
        assert_eq!(b.state(), &before);
        assert_eq!(b.ticks(), 0);

        b.handle(Gesture::Tap);
        b.tick();
        assert_ne!(b.state().pos, before.pos);
        assert_eq!(b.ticks(), 1);
    }

    #[test]
    fn test_long_press_slows_then_floors() {
        let mut b = bouncer(1);
        b.handle(Gesture::LongPress);
        assert_eq!(b.state().speed, 1);
        b.handle(Gesture::LongPress);
        assert_eq!(b.state().speed, 1);
    }

    #[test]
    fn test_resize_keeps_position_and_speed() {
        let mut b = bouncer(3);
        let before = b.state().clone();
        b.on_resize(CanvasSize::new(800.0, 400.0));
        assert_eq!(b.state().pos, before.pos);
        assert_eq!(b.state().speed, before.speed);
        assert_eq!(b.state().canvas, CanvasSize::new(800.0, 400.0));
    }

    #[test]
    fn test_stays_near_canvas_over_long_run() {
        let mut b = bouncer(77);
        let mut reflections = 0;
        for _ in 0..5_000 {
            if b.tick().any() {
                reflections += 1;
            }
            let s = b.state();
            let step = 2.0 * s.speed as f32;
            assert!(s.pos.x >= -step && s.pos.x + s.size <= s.canvas.width + step);
            assert!(s.pos.y >= -step && s.pos.y + s.size <= s.canvas.height + step);
        }
        assert!(reflections > 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = bouncer(99999);
        let mut b = bouncer(99999);
        let script = [
            (10, Some(Gesture::LongPress)),
            (200, Some(Gesture::Tap)),
            (30, Some(Gesture::Tap)),
            (500, None),
        ];
        for (ticks, gesture) in script {
            for _ in 0..ticks {
                a.tick();
                b.tick();
            }
            if let Some(g) = gesture {
                a.handle(g);
                b.handle(g);
            }
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.ticks(), b.ticks());
    }
}
