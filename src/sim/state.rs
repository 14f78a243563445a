//! Motion state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives in [`MotionState`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Direction multiplier along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// Moving toward the origin (left / up)
    Neg,
    /// Moving away from the origin (right / down)
    Pos,
}

impl Sign {
    pub fn flipped(self) -> Self {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Neg => -1.0,
            Sign::Pos => 1.0,
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Roll a uniformly random color
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// `#RRGGBB` form
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Normalized RGBA for the GPU
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLUE
    }
}

/// Canvas extent in canvas units (owned by the hosting surface)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Complete state of the bouncing square at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Top-left corner of the square
    pub pos: Vec2,
    pub dir_x: Sign,
    pub dir_y: Sign,
    /// Step multiplier, never below [`MIN_SPEED`]
    pub speed: u32,
    pub color: Rgb,
    pub paused: bool,
    /// Side length of the square
    pub size: f32,
    pub canvas: CanvasSize,
}

impl MotionState {
    /// Place a fresh square at a random spot fully inside the canvas
    pub fn new<R: Rng>(canvas: CanvasSize, size: f32, speed: u32, rng: &mut R) -> Self {
        let x = random_offset(canvas.width - size, rng);
        let y = random_offset(canvas.height - size, rng);
        Self {
            pos: Vec2::new(x, y),
            dir_x: Sign::Pos,
            dir_y: Sign::Pos,
            speed: speed.max(MIN_SPEED),
            color: Rgb::BLUE,
            paused: false,
            size,
            canvas,
        }
    }

    /// Per-tick displacement at the current speed and heading
    pub fn step(&self) -> Vec2 {
        let len = STEP_PER_SPEED * self.speed as f32;
        Vec2::new(len * self.dir_x.as_f32(), len * self.dir_y.as_f32())
    }

    /// Whether the square currently lies fully inside the canvas
    pub fn in_bounds(&self) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.pos.x + self.size <= self.canvas.width
            && self.pos.y + self.size <= self.canvas.height
    }
}

/// Whole-unit offset in `[0, span]`; a negative span (canvas smaller than
/// the square) pins the offset to 0
fn random_offset<R: Rng>(span: f32, rng: &mut R) -> f32 {
    if span <= 0.0 {
        return 0.0;
    }
    let roll: f32 = rng.random();
    (roll * span).floor().min(span)
}
