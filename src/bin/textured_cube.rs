//! A textured cube corner behind a perspective camera.
//!
//! Press Space to switch between the hand-derived view and projection
//! matrices and glam's. If the derivation is right, nothing on screen moves.

use std::path::Path;

use glow::HasContext;
use glutin::event::VirtualKeyCode;
use learn_glow::app::{self, Demo, Frame};
use learn_glow::camera::{orbit_eye, Camera, ProjectionMode};
use learn_glow::geometry::cube_corner;
use learn_glow::gpu::GpuMesh;
use learn_glow::texture::{self, TextureImage};
use learn_glow::{logging, shaders, Error};

const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/checker.png");

const ORBIT_RADIUS: f32 = 2.5;
const ORBIT_HEIGHT: f32 = 1.6;
/// Radians per second.
const ORBIT_SPEED: f32 = 0.5;

struct TexturedCube {
    program: glow::Program,
    view: Option<glow::UniformLocation>,
    projection: Option<glow::UniformLocation>,
    sampler: Option<glow::UniformLocation>,
    mesh: GpuMesh,
    texture: glow::Texture,
    mode: ProjectionMode,
}

impl Demo for TexturedCube {
    const TITLE: &'static str = "textured cube";

    unsafe fn init(gl: &glow::Context) -> Result<Self, Error> {
        let image = TextureImage::open(Path::new(TEXTURE_PATH)).unwrap_or_else(|err| {
            tracing::warn!("{err}; using a generated checkerboard instead");
            TextureImage::checkerboard(256, 32)
        });

        unsafe {
            let program = shaders::compile_program(
                gl,
                shaders::TEXTURED_VERTEX_SRC,
                shaders::TEXTURED_FRAGMENT_SRC,
            )?;
            let demo = Self {
                program,
                view: shaders::uniform(gl, program, "u_view"),
                projection: shaders::uniform(gl, program, "u_projection"),
                sampler: shaders::uniform(gl, program, "u_texture"),
                mesh: GpuMesh::from_mesh(gl, program, &cube_corner())?,
                texture: texture::upload(gl, &image)?,
                mode: ProjectionMode::default(),
            };
            tracing::info!(mode = %demo.mode, "press Space to switch projection");
            Ok(demo)
        }
    }

    unsafe fn render(&mut self, gl: &glow::Context, frame: &Frame) {
        let eye = orbit_eye(frame.elapsed * ORBIT_SPEED, ORBIT_RADIUS, ORBIT_HEIGHT);
        let mut camera = Camera::looking_at_origin(eye);
        camera.set_aspect(frame.width, frame.height);
        let view = camera.view_matrix(self.mode);
        let projection = camera.projection_matrix(self.mode);

        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(self.view.as_ref(), false, &view.to_cols_array());
            gl.uniform_matrix_4_f32_slice(
                self.projection.as_ref(),
                false,
                &projection.to_cols_array(),
            );
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            gl.uniform_1_i32(self.sampler.as_ref(), 0);
            self.mesh.draw(gl);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    fn key_pressed(&mut self, key: VirtualKeyCode) {
        if key == VirtualKeyCode::Space {
            self.mode = self.mode.toggle();
            tracing::info!(mode = %self.mode, "projection switched");
        }
    }

    unsafe fn destroy(&self, gl: &glow::Context) {
        unsafe {
            self.mesh.destroy(gl);
            gl.delete_texture(self.texture);
            gl.delete_program(self.program);
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = app::run::<TexturedCube>(&TexturedCube::config()) {
        tracing::error!("{err}");
        std::process::exit(-1);
    }
}
