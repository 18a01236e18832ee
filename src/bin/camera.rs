//! The colored triangle seen by a camera circling it.
//!
//! Only a view matrix is applied, so eye space is drawn as if it were clip
//! space. A triangle corner is at most `√½` from the origin, so the eye
//! distance plus `√½` must stay within 1 or the corners leave the `[-1, 1]`
//! clip cube and get cut off.

use glam::Vec3;
use glow::HasContext;
use learn_glow::app::{self, Demo, Frame};
use learn_glow::camera::{look_at, orbit_eye};
use learn_glow::geometry::TRIANGLE;
use learn_glow::gpu::GpuMesh;
use learn_glow::{logging, shaders, Error};

// Eye distance √(0.25² + 0.1²) ≈ 0.27.
const ORBIT_RADIUS: f32 = 0.25;
const ORBIT_HEIGHT: f32 = 0.1;

struct CameraDemo {
    program: glow::Program,
    view: Option<glow::UniformLocation>,
    mesh: GpuMesh,
}

impl Demo for CameraDemo {
    const TITLE: &'static str = "camera";

    unsafe fn init(gl: &glow::Context) -> Result<Self, Error> {
        unsafe {
            let program = shaders::compile_program(
                gl,
                shaders::VIEW_VERTEX_SRC,
                shaders::COLOR_FRAGMENT_SRC,
            )?;
            Ok(Self {
                program,
                view: shaders::uniform(gl, program, "u_view"),
                mesh: GpuMesh::from_vertices(gl, program, &TRIANGLE)?,
            })
        }
    }

    unsafe fn render(&mut self, gl: &glow::Context, frame: &Frame) {
        let eye = orbit_eye(frame.elapsed, ORBIT_RADIUS, ORBIT_HEIGHT);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(self.view.as_ref(), false, &view.to_cols_array());
            self.mesh.draw(gl);
        }
    }

    unsafe fn destroy(&self, gl: &glow::Context) {
        unsafe {
            self.mesh.destroy(gl);
            gl.delete_program(self.program);
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = app::run::<CameraDemo>(&CameraDemo::config()) {
        tracing::error!("{err}");
        std::process::exit(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::TAU;

    #[test]
    fn triangle_stays_inside_clip_cube_for_a_whole_orbit() {
        let mut worst = 0.0_f32;
        for step in 0..=3600 {
            #[expect(clippy::cast_precision_loss)]
            let t = step as f32 / 3600.0 * TAU;
            let view = look_at(orbit_eye(t, ORBIT_RADIUS, ORBIT_HEIGHT), Vec3::ZERO, Vec3::Y);
            for vertex in &TRIANGLE {
                let p = view.transform_point3(Vec3::from(vertex.position));
                worst = worst.max(p.abs().max_element());
            }
        }
        assert!(worst <= 1.0, "triangle reaches {worst} at its farthest");
    }
}
