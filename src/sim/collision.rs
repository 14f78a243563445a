//! Edge reflection for an axis-aligned square inside the canvas
//!
//! Each axis is handled independently: the square moves to its candidate
//! position, and if that candidate pokes past either edge the heading on
//! that axis is reversed for the next tick.

use serde::{Deserialize, Serialize};

use super::state::Sign;

/// What happens to the committed position on a tick that reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReflectionMode {
    /// Commit the candidate as-is; the square may overshoot an edge by up to
    /// one step until the reversed heading carries it back
    #[default]
    Unclamped,
    /// Pull the committed position back inside the canvas
    Clamped,
}

impl ReflectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionMode::Unclamped => "Unclamped",
            ReflectionMode::Clamped => "Clamped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unclamped" | "overshoot" => Some(ReflectionMode::Unclamped),
            "clamped" | "clamp" => Some(ReflectionMode::Clamped),
            _ => None,
        }
    }
}

/// True if a square at `candidate` with side `size` leaves `[0, extent]`
#[inline]
pub fn crosses_edge(candidate: f32, size: f32, extent: f32) -> bool {
    candidate < 0.0 || candidate + size > extent
}

/// Result of moving along a single axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMove {
    /// Position committed for this tick
    pub pos: f32,
    /// Heading for the next tick
    pub dir: Sign,
    /// Whether the candidate crossed an edge
    pub reflected: bool,
}

/// Advance one axis by `step` and reflect against `[0, extent]`
pub fn move_axis(
    pos: f32,
    dir: Sign,
    step: f32,
    size: f32,
    extent: f32,
    mode: ReflectionMode,
) -> AxisMove {
    let candidate = pos + step * dir.as_f32();
    if !crosses_edge(candidate, size, extent) {
        return AxisMove {
            pos: candidate,
            dir,
            reflected: false,
        };
    }

    let pos = match mode {
        ReflectionMode::Unclamped => candidate,
        // max(0) last so a canvas narrower than the square pins to the origin
        ReflectionMode::Clamped => candidate.min(extent - size).max(0.0),
    };
    AxisMove {
        pos,
        dir: dir.flipped(),
        reflected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosses_edge() {
        assert!(!crosses_edge(0.0, 50.0, 100.0));
        assert!(!crosses_edge(50.0, 50.0, 100.0)); // flush with far edge
        assert!(crosses_edge(-0.5, 50.0, 100.0));
        assert!(crosses_edge(50.5, 50.0, 100.0));
    }

    #[test]
    fn test_move_axis_far_edge_overshoots() {
        let m = move_axis(60.0, Sign::Pos, 4.0, 50.0, 100.0, ReflectionMode::Unclamped);
        assert_eq!(m.pos, 64.0);
        assert_eq!(m.dir, Sign::Neg);
        assert!(m.reflected);
    }

    #[test]
    fn test_move_axis_near_edge_overshoots() {
        let m = move_axis(2.0, Sign::Neg, 4.0, 50.0, 100.0, ReflectionMode::Unclamped);
        assert_eq!(m.pos, -2.0);
        assert_eq!(m.dir, Sign::Pos);
        assert!(m.reflected);
    }

    #[test]
    fn test_move_axis_clamped() {
        let m = move_axis(60.0, Sign::Pos, 4.0, 50.0, 100.0, ReflectionMode::Clamped);
        assert_eq!(m.pos, 50.0);
        assert_eq!(m.dir, Sign::Neg);

        let m = move_axis(2.0, Sign::Neg, 4.0, 50.0, 100.0, ReflectionMode::Clamped);
        assert_eq!(m.pos, 0.0);
        assert_eq!(m.dir, Sign::Pos);
    }

    #[test]
    fn test_move_axis_free() {
        let m = move_axis(10.0, Sign::Pos, 4.0, 50.0, 100.0, ReflectionMode::Unclamped);
        assert_eq!(m.pos, 14.0);
        assert_eq!(m.dir, Sign::Pos);
        assert!(!m.reflected);
    }

    #[test]
    fn test_reflection_mode_from_str() {
        assert_eq!(ReflectionMode::from_str("CLAMPED"), Some(ReflectionMode::Clamped));
        assert_eq!(ReflectionMode::from_str("unclamped"), Some(ReflectionMode::Unclamped));
        assert_eq!(ReflectionMode::from_str("bogus"), None);
        assert_eq!(ReflectionMode::Clamped.as_str(), "Clamped");
    }
}
