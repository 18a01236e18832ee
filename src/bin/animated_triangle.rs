//! The colored triangle, moved, squashed and spun by uniforms every frame.

use glow::HasContext;
use learn_glow::animation::TriangleMotion;
use learn_glow::app::{self, Demo, Frame};
use learn_glow::geometry::TRIANGLE;
use learn_glow::gpu::GpuMesh;
use learn_glow::{logging, shaders, Error};

struct AnimatedTriangle {
    program: glow::Program,
    offset: Option<glow::UniformLocation>,
    scale: Option<glow::UniformLocation>,
    angle: Option<glow::UniformLocation>,
    mesh: GpuMesh,
}

impl Demo for AnimatedTriangle {
    const TITLE: &'static str = "animated triangle";

    unsafe fn init(gl: &glow::Context) -> Result<Self, Error> {
        unsafe {
            let program = shaders::compile_program(
                gl,
                shaders::ANIMATED_VERTEX_SRC,
                shaders::COLOR_FRAGMENT_SRC,
            )?;
            Ok(Self {
                program,
                offset: shaders::uniform(gl, program, "u_offset"),
                scale: shaders::uniform(gl, program, "u_scale"),
                angle: shaders::uniform(gl, program, "u_angle"),
                mesh: GpuMesh::from_vertices(gl, program, &TRIANGLE)?,
            })
        }
    }

    unsafe fn render(&mut self, gl: &glow::Context, frame: &Frame) {
        let motion = TriangleMotion::at(frame.elapsed);
        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_2_f32(self.offset.as_ref(), motion.offset.x, motion.offset.y);
            gl.uniform_2_f32(self.scale.as_ref(), motion.scale.x, motion.scale.y);
            gl.uniform_1_f32(self.angle.as_ref(), motion.angle);
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
    if let Err(err) = app::run::<AnimatedTriangle>(&AnimatedTriangle::config()) {
        tracing::error!("{err}");
        std::process::exit(-1);
    }
}
