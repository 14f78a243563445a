//! Shape generation for the square

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::{CanvasSize, MotionState};

/// Canvas coordinates (origin top-left, y down) to normalized device
/// coordinates (origin center, y up)
pub fn canvas_to_ndc(p: Vec2, canvas: CanvasSize) -> Vec2 {
    let w = canvas.width.max(1.0);
    let h = canvas.height.max(1.0);
    Vec2::new(p.x / w * 2.0 - 1.0, 1.0 - p.y / h * 2.0)
}

/// Two counter-clockwise triangles covering the square
pub fn square(state: &MotionState) -> [Vertex; 6] {
    let color = state.color.to_rgba_f32();
    let min = state.pos;
    let max = state.pos + Vec2::splat(state.size);

    // In NDC y is flipped, so the canvas-top edge maps to the larger y
    let tl = canvas_to_ndc(min, state.canvas);
    let br = canvas_to_ndc(max, state.canvas);
    let bl = Vec2::new(tl.x, br.y);
    let tr = Vec2::new(br.x, tl.y);

    [bl, br, tr, bl, tr, tl].map(|p| Vertex::new(p.x, p.y, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rgb, Sign};

    #[test]
    fn test_canvas_corners_map_to_ndc() {
        let canvas = CanvasSize::new(400.0, 800.0);
        assert_eq!(canvas_to_ndc(Vec2::ZERO, canvas), Vec2::new(-1.0, 1.0));
        assert_eq!(canvas_to_ndc(Vec2::new(400.0, 800.0), canvas), Vec2::new(1.0, -1.0));
        assert_eq!(canvas_to_ndc(Vec2::new(200.0, 400.0), canvas), Vec2::ZERO);
    }

    #[test]
    fn test_square_covers_state_rect() {
        let state = MotionState {
            pos: Vec2::new(100.0, 200.0),
            dir_x: Sign::Pos,
            dir_y: Sign::Pos,
            speed: 2,
            color: Rgb::new(255, 0, 0),
            paused: false,
            size: 100.0,
            canvas: CanvasSize::new(400.0, 400.0),
        };
        let verts = square(&state);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -0.5);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -0.5);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 0.0);
        assert!(verts.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }
}
