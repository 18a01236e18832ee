//! A static triangle with one color per vertex.

use glow::HasContext;
use learn_glow::app::{self, Demo, Frame};
use learn_glow::geometry::TRIANGLE;
use learn_glow::gpu::GpuMesh;
use learn_glow::{logging, shaders, Error};

struct Triangle {
    program: glow::Program,
    mesh: GpuMesh,
}

impl Demo for Triangle {
    const TITLE: &'static str = "triangle";

    unsafe fn init(gl: &glow::Context) -> Result<Self, Error> {
        let program = unsafe {
            shaders::compile_program(gl, shaders::COLOR_VERTEX_SRC, shaders::COLOR_FRAGMENT_SRC)?
        };
        let mesh = unsafe { GpuMesh::from_vertices(gl, program, &TRIANGLE)? };
        Ok(Self { program, mesh })
    }

    unsafe fn render(&mut self, gl: &glow::Context, _frame: &Frame) {
        unsafe {
            gl.use_program(Some(self.program));
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
    if let Err(err) = app::run::<Triangle>(&Triangle::config()) {
        tracing::error!("{err}");
        std::process::exit(-1);
    }
}
