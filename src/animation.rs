//! Time-driven uniforms for the animated triangle.

use glam::Vec2;

/// Per-frame `offset`, `scale` and `angle` uniforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleMotion {
    /// Translation applied last, in NDC units.
    pub offset: Vec2,
    /// Non-uniform scale applied first.
    pub scale: Vec2,
    /// Rotation in radians, applied between scale and offset.
    pub angle: f32,
}

impl TriangleMotion {
    /// The motion at `elapsed` seconds since startup.
    ///
    /// The offset traces a circle of radius 0.5; the two scale axes breathe
    /// at unrelated frequencies so the shape never repeats exactly.
    #[must_use]
    pub fn at(elapsed: f32) -> Self {
        Self {
            offset: Vec2::new(elapsed.sin() * 0.5, elapsed.cos() * 0.5),
            scale: Vec2::new(
                1.0 + (elapsed * 1.13).sin() * 0.25,
                1.0 + (elapsed * 1.71).cos() * 0.3,
            ),
            angle: elapsed,
        }
    }

    /// Apply the motion to a point exactly as the vertex shader does.
    #[must_use]
    pub fn apply(&self, point: Vec2) -> Vec2 {
        rotate(point * self.scale, self.angle) + self.offset
    }
}

/// Rotate `point` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(point: Vec2, angle: f32) -> Vec2 {
    // Same construction as the shader: the rotated x and y basis vectors
    // weighted by the point's coordinates.
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin) * point.x + Vec2::new(-sin, cos) * point.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f32 = 1e-5;

    fn assert_vec2_eq(actual: Vec2, expected: Vec2) {
        assert!(
            actual.abs_diff_eq(expected, TOLERANCE),
            "expected {expected:?}, got {actual:?}",
        );
    }

    #[test]
    fn motion_at_startup() {
        let m = TriangleMotion::at(0.0);
        assert_vec2_eq(m.offset, Vec2::new(0.0, 0.5));
        assert_vec2_eq(m.scale, Vec2::new(1.0, 1.3));
        assert!(m.angle.abs() < f32::EPSILON);
    }

    #[test]
    fn offset_stays_on_circle() {
        for t in [0.3, 1.0, 2.5, 10.0, 123.4] {
            let m = TriangleMotion::at(t);
            assert!((m.offset.length() - 0.5).abs() < TOLERANCE);
        }
    }

    #[test]
    fn scale_stays_within_bounds() {
        for i in 0..1000 {
            #[expect(clippy::cast_precision_loss)]
            let t = i as f32 * 0.037;
            let m = TriangleMotion::at(t);
            assert!((0.75..=1.25).contains(&m.scale.x), "scale.x = {}", m.scale.x);
            assert!((0.7..=1.3).contains(&m.scale.y), "scale.y = {}", m.scale.y);
        }
    }

    #[test]
    fn rotate_quarter_turns() {
        assert_vec2_eq(rotate(Vec2::X, FRAC_PI_2), Vec2::Y);
        assert_vec2_eq(rotate(Vec2::Y, FRAC_PI_2), -Vec2::X);
        assert_vec2_eq(rotate(Vec2::new(0.5, -0.5), PI), Vec2::new(-0.5, 0.5));
    }

    #[test]
    fn apply_scales_then_rotates_then_offsets() {
        let m = TriangleMotion {
            offset: Vec2::new(0.1, 0.2),
            scale: Vec2::new(2.0, 1.0),
            angle: FRAC_PI_2,
        };
        // (0.5, 0) -> scaled (1, 0) -> rotated (0, 1) -> offset (0.1, 1.2)
        assert_vec2_eq(m.apply(Vec2::new(0.5, 0.0)), Vec2::new(0.1, 1.2));
    }
}
