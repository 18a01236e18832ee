//! View and projection matrices, derived by hand.
//!
//! [`look_at`] and [`frustum`] build the two camera transforms from first
//! principles. [`ProjectionMode`] lets a demo swap them at runtime for the
//! equivalent transforms shipped with [`glam`], which is how the hand-derived
//! versions are checked by eye (and by the tests at the bottom of this file).
//!
//! All matrices follow OpenGL conventions: right-handed eye space looking
//! down `-Z`, clip-space depth in `[-1, 1]`, column-major storage.

use std::f32::consts::FRAC_PI_4;
use std::fmt;

use glam::{Mat4, Vec3, Vec4};

/// Which implementation of the camera transforms to use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    /// The matrices derived in this module.
    #[default]
    Custom,
    /// [`Mat4::look_at_rh`] and [`Mat4::perspective_rh_gl`].
    Reference,
}

impl ProjectionMode {
    /// The other mode.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Custom => Self::Reference,
            Self::Reference => Self::Custom,
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom => f.write_str("custom"),
            Self::Reference => f.write_str("glam"),
        }
    }
}

/// An off-center viewing frustum.
///
/// `left`, `right`, `bottom` and `top` are measured on the near plane;
/// `near` and `far` are positive distances along `-Z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Left edge of the near rectangle.
    pub left: f32,
    /// Right edge of the near rectangle.
    pub right: f32,
    /// Bottom edge of the near rectangle.
    pub bottom: f32,
    /// Top edge of the near rectangle.
    pub top: f32,
    /// Distance to the near clipping plane.
    pub near: f32,
    /// Distance to the far clipping plane.
    pub far: f32,
}

/// Symmetric perspective projection parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Width divided by height.
    pub aspect: f32,
    /// Distance to the near clipping plane.
    pub near: f32,
    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Perspective {
    /// The frustum this perspective describes.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        let top = self.near * (self.fovy * 0.5).tan();
        let right = top * self.aspect;
        Frustum {
            left: -right,
            right,
            bottom: -top,
            top,
            near: self.near,
            far: self.far,
        }
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fovy: FRAC_PI_4,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Build a view matrix for a camera at `eye` looking at `center`.
///
/// `up` only needs to be roughly up; the camera's actual up vector is
/// recomputed so that forward, side and up form an orthonormal basis.
/// `up` must not be parallel to `center - eye`.
#[must_use]
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let forward = (center - eye).normalize();
    let side = forward.cross(up);
    debug_assert!(side.length_squared() > 0.0, "up is parallel to the view direction");
    let side = side.normalize();
    let up = side.cross(forward);

    // The rows of the rotation are the camera basis, with forward negated
    // because the camera looks down -Z. The translation moves `eye` to the
    // origin, expressed in that basis.
    Mat4::from_cols(
        Vec4::new(side.x, up.x, -forward.x, 0.0),
        Vec4::new(side.y, up.y, -forward.y, 0.0),
        Vec4::new(side.z, up.z, -forward.z, 0.0),
        Vec4::new(-side.dot(eye), -up.dot(eye), forward.dot(eye), 1.0),
    )
}

/// Build a perspective projection for an off-center frustum.
///
/// The near rectangle `[left, right] x [bottom, top]` maps to the NDC square
/// `[-1, 1]²`; depth maps `-near` to `-1` and `-far` to `1`.
#[must_use]
pub fn frustum(f: &Frustum) -> Mat4 {
    let width = f.right - f.left;
    let height = f.top - f.bottom;
    let depth = f.far - f.near;
    debug_assert!(width != 0.0 && height != 0.0 && depth != 0.0, "degenerate frustum");

    // x and y are first scaled so the near rectangle becomes 2 units wide,
    // then shifted by its center. The shift sits in the third column so it
    // is applied before the perspective divide by -z.
    Mat4::from_cols(
        Vec4::new(2.0 * f.near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * f.near / height, 0.0, 0.0),
        Vec4::new(
            (f.right + f.left) / width,
            (f.top + f.bottom) / height,
            -(f.far + f.near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * f.far * f.near / depth, 0.0),
    )
}

/// Build a symmetric perspective projection.
#[must_use]
pub fn perspective(p: &Perspective) -> Mat4 {
    frustum(&p.frustum())
}

/// Eye position circling the Y axis once every `2π` seconds.
///
/// At `elapsed == 0` the eye sits on `+Z`.
#[must_use]
pub fn orbit_eye(elapsed: f32, radius: f32, height: f32) -> Vec3 {
    let (sin, cos) = elapsed.sin_cos();
    Vec3::new(sin * radius, height, cos * radius)
}

/// A perspective camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up hint, see [`look_at`].
    pub up: Vec3,
    /// Lens parameters.
    pub perspective: Perspective,
}

impl Camera {
    /// A camera at `eye` looking at the origin with `+Y` up.
    #[must_use]
    pub fn looking_at_origin(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            perspective: Perspective::default(),
        }
    }

    /// Update the aspect ratio from a framebuffer size.
    ///
    /// A zero-sized framebuffer (minimized window) leaves it unchanged.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            #[expect(clippy::cast_precision_loss)]
            {
                self.perspective.aspect = width as f32 / height as f32;
            }
        }
    }

    /// World to eye space.
    #[must_use]
    pub fn view_matrix(&self, mode: ProjectionMode) -> Mat4 {
        match mode {
            ProjectionMode::Custom => look_at(self.eye, self.target, self.up),
            ProjectionMode::Reference => Mat4::look_at_rh(self.eye, self.target, self.up),
        }
    }

    /// Eye to clip space.
    #[must_use]
    pub fn projection_matrix(&self, mode: ProjectionMode) -> Mat4 {
        let p = &self.perspective;
        match mode {
            ProjectionMode::Custom => perspective(p),
            ProjectionMode::Reference => Mat4::perspective_rh_gl(p.fovy, p.aspect, p.near, p.far),
        }
    }

    /// World to clip space.
    #[must_use]
    pub fn view_projection(&self, mode: ProjectionMode) -> Mat4 {
        self.projection_matrix(mode) * self.view_matrix(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn assert_mat_eq(actual: Mat4, expected: Mat4) {
        assert!(
            actual.abs_diff_eq(expected, TOLERANCE),
            "expected {expected:?}, got {actual:?}",
        );
    }

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, TOLERANCE),
            "expected {expected:?}, got {actual:?}",
        );
    }

    /// Eye positions spread over a shell around the origin, avoiding the
    /// poles where +Y would be parallel to the view direction.
    fn sample_eyes() -> Vec<Vec3> {
        let mut eyes = Vec::new();
        for i in 0..12 {
            #[expect(clippy::cast_precision_loss)]
            let yaw = i as f32 * 0.53;
            for height in [-4.0, -1.5, 0.0, 0.7, 3.0] {
                for radius in [0.5, 2.0, 9.0] {
                    eyes.push(Vec3::new(yaw.sin() * radius, height, yaw.cos() * radius));
                }
            }
        }
        eyes
    }

    #[test]
    fn look_at_matches_glam_across_sampled_eyes() {
        let targets = [Vec3::ZERO, Vec3::new(0.3, -0.2, 1.1), Vec3::new(-2.0, 0.5, 0.0)];
        for eye in sample_eyes() {
            for target in targets {
                if (target - eye).normalize().cross(Vec3::Y).length() < 1e-3 {
                    continue;
                }
                assert_mat_eq(
                    look_at(eye, target, Vec3::Y),
                    Mat4::look_at_rh(eye, target, Vec3::Y),
                );
            }
        }
    }

    #[test]
    fn look_at_with_tilted_up_hint_matches_glam() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let up = Vec3::new(0.2, 1.0, -0.4);
        assert_mat_eq(look_at(eye, Vec3::ZERO, up), Mat4::look_at_rh(eye, Vec3::ZERO, up));
    }

    #[test]
    fn look_at_rotation_is_orthonormal() {
        let view = look_at(Vec3::new(3.0, 1.0, -2.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let rows = [view.row(0).truncate(), view.row(1).truncate(), view.row(2).truncate()];
        for (i, a) in rows.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < TOLERANCE);
            for b in &rows[i + 1..] {
                assert!(a.dot(*b).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(2.0, 3.0, 4.0);
        let target = Vec3::new(-1.0, 0.0, 0.5);
        let view = look_at(eye, target, Vec3::Y);

        assert_vec3_eq(view.transform_point3(eye), Vec3::ZERO);
        let distance = (target - eye).length();
        assert_vec3_eq(view.transform_point3(target), Vec3::new(0.0, 0.0, -distance));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "up is parallel to the view direction")]
    fn look_at_rejects_up_along_view_direction() {
        let _ = look_at(Vec3::ZERO, Vec3::Y, Vec3::Y);
    }

    #[test]
    fn perspective_matches_glam_across_sampled_aspects() {
        for aspect in [0.25, 0.5, 0.75, 1.0, 4.0 / 3.0, 16.0 / 9.0, 2.35, 5.0] {
            for fovy in [0.3, FRAC_PI_4, 1.2, 2.0] {
                for (near, far) in [(0.1, 100.0), (1.0, 10.0), (0.01, 5000.0)] {
                    let p = Perspective {
                        fovy,
                        aspect,
                        near,
                        far,
                    };
                    let expected = Mat4::perspective_rh_gl(fovy, aspect, near, far);
                    assert_mat_eq(perspective(&p), expected);
                }
            }
        }
    }

    #[test]
    fn symmetric_frustum_has_no_shift() {
        let f = Perspective::default().frustum();
        assert!((f.left + f.right).abs() < f32::EPSILON);
        assert!((f.bottom + f.top).abs() < f32::EPSILON);
        let m = frustum(&f);
        assert!(m.z_axis.x.abs() < f32::EPSILON);
        assert!(m.z_axis.y.abs() < f32::EPSILON);
    }

    #[test]
    fn off_center_frustum_maps_corners_to_ndc_cube() {
        let f = Frustum {
            left: -0.3,
            right: 0.9,
            bottom: -0.2,
            top: 0.5,
            near: 0.5,
            far: 20.0,
        };
        let m = frustum(&f);

        assert_vec3_eq(
            m.project_point3(Vec3::new(f.left, f.bottom, -f.near)),
            Vec3::new(-1.0, -1.0, -1.0),
        );
        assert_vec3_eq(
            m.project_point3(Vec3::new(f.right, f.top, -f.near)),
            Vec3::new(1.0, 1.0, -1.0),
        );

        // The far plane corners are the near ones scaled by far / near.
        let s = f.far / f.near;
        assert_vec3_eq(
            m.project_point3(Vec3::new(f.right * s, f.bottom * s, -f.far)),
            Vec3::new(1.0, -1.0, 1.0),
        );
    }

    #[test]
    fn off_center_frustum_only_adds_a_shift_column() {
        let off_center = Frustum {
            left: -1.0,
            right: 3.0,
            bottom: -1.0,
            top: 1.0,
            near: 1.0,
            far: 50.0,
        };
        let centered = Frustum {
            left: -2.0,
            right: 2.0,
            ..off_center
        };
        let shifted = frustum(&centered);
        // (r + l) / (r - l) = 2 / 4
        let expected = Mat4::from_cols(
            shifted.x_axis,
            shifted.y_axis,
            shifted.z_axis + Vec4::new(0.5, 0.0, 0.0, 0.0),
            shifted.w_axis,
        );
        assert_mat_eq(frustum(&off_center), expected);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "degenerate frustum")]
    fn frustum_rejects_zero_depth() {
        let _ = frustum(&Frustum {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: 2.0,
            far: 2.0,
        });
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "degenerate frustum")]
    fn frustum_rejects_empty_near_rectangle() {
        let _ = frustum(&Frustum {
            left: 0.5,
            right: 0.5,
            ..Perspective::default().frustum()
        });
    }

    #[test]
    fn camera_modes_agree() {
        let mut camera = Camera::looking_at_origin(orbit_eye(0.8, 3.0, 1.5));
        camera.set_aspect(800, 600);
        assert_mat_eq(
            camera.view_projection(ProjectionMode::Custom),
            camera.view_projection(ProjectionMode::Reference),
        );
    }

    #[test]
    fn set_aspect_ignores_empty_framebuffer() {
        let mut camera = Camera::looking_at_origin(Vec3::Z);
        camera.set_aspect(1920, 1080);
        let aspect = camera.perspective.aspect;
        assert!((aspect - 16.0 / 9.0).abs() < f32::EPSILON);

        camera.set_aspect(0, 1080);
        camera.set_aspect(1920, 0);
        assert!((camera.perspective.aspect - aspect).abs() < f32::EPSILON);
    }

    #[test]
    fn orbit_eye_circles_y_axis() {
        assert_vec3_eq(orbit_eye(0.0, 2.0, 1.0), Vec3::new(0.0, 1.0, 2.0));
        assert_vec3_eq(
            orbit_eye(std::f32::consts::FRAC_PI_2, 2.0, 1.0),
            Vec3::new(2.0, 1.0, 0.0),
        );
        for t in [0.1, 1.7, 4.2] {
            let eye = orbit_eye(t, 3.0, -0.5);
            assert!((Vec3::new(eye.x, 0.0, eye.z).length() - 3.0).abs() < TOLERANCE);
            assert!((eye.y + 0.5).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn projection_mode_toggles_back_and_forth() {
        let mode = ProjectionMode::default();
        assert_eq!(mode, ProjectionMode::Custom);
        assert_eq!(mode.toggle(), ProjectionMode::Reference);
        assert_eq!(mode.toggle().toggle(), mode);
        assert_eq!(ProjectionMode::Reference.to_string(), "glam");
    }
}
