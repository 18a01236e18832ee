//! Window creation and the per-frame loop every demo runs in.
//!
//! A demo implements [`Demo`] and hands itself to [`run`], which owns the
//! window, the GL context and the event loop. The loop is single-threaded
//! and blocking: poll events, clear, let the demo draw, swap.

use std::collections::HashSet;
use std::time::Instant;

use glow::HasContext;
use glutin::dpi::LogicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest};

use crate::gpu::gl_size;
use crate::{Error, WindowConfig};

/// Timing and framebuffer size for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Seconds since the demo started.
    pub elapsed: f32,
    /// Framebuffer width in physical pixels.
    pub width: u32,
    /// Framebuffer height in physical pixels.
    pub height: u32,
}

impl Frame {
    /// Width divided by height, or `None` while the framebuffer is empty
    /// (a minimized window), in which case nothing is drawn.
    #[must_use]
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let aspect = self.width as f32 / self.height as f32;
        Some(aspect)
    }
}

/// One of the demo programs.
pub trait Demo: Sized {
    /// Window title.
    const TITLE: &'static str;

    /// Window settings; the defaults with [`TITLE`](Self::TITLE).
    #[must_use]
    fn config() -> WindowConfig {
        WindowConfig::titled(Self::TITLE)
    }

    /// Create the demo's GL resources.
    ///
    /// # Safety
    ///
    /// Called with the demo's context current.
    ///
    /// # Errors
    ///
    /// Shader errors (see [`Error::is_shader`]) are logged and the window
    /// stays open showing only the clear color; any other error aborts
    /// startup.
    unsafe fn init(gl: &glow::Context) -> Result<Self, Error>;

    /// Draw one frame. The viewport is set and the framebuffer cleared.
    ///
    /// # Safety
    ///
    /// Called with the demo's context current.
    unsafe fn render(&mut self, gl: &glow::Context, frame: &Frame);

    /// A key went down. Auto-repeat is filtered out.
    fn key_pressed(&mut self, _key: VirtualKeyCode) {}

    /// Release the GL resources created by [`init`](Self::init).
    ///
    /// # Safety
    ///
    /// Called once, with the demo's context current.
    unsafe fn destroy(&self, gl: &glow::Context);
}

/// Filters keyboard auto-repeat so each physical press is reported once.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<VirtualKeyCode>,
}

impl KeyTracker {
    /// Record a key event; returns `true` only for the initial press.
    pub fn update(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => self.held.insert(key),
            ElementState::Released => {
                self.held.remove(&key);
                false
            }
        }
    }
}

/// Open a window for `D` and run it until the window is closed or Escape is
/// pressed. The process exits from inside the event loop with code 0.
///
/// # Errors
///
/// Returns an error if the window or context cannot be created, the context
/// cannot be made current, or [`Demo::init`] fails with a non-shader error.
pub fn run<D: Demo + 'static>(config: &WindowConfig) -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height));
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, config.gl_version))
        .with_gl_profile(GlProfile::Core)
        .with_multisampling(config.samples)
        .with_depth_buffer(config.depth_bits)
        .with_vsync(config.vsync)
        .build_windowed(window, &event_loop)?;
    let context = unsafe { context.make_current() }.map_err(|(_, err)| err)?;

    let gl =
        unsafe { glow::Context::from_loader_function(|symbol| context.get_proc_address(symbol)) };

    unsafe {
        tracing::info!(
            version = %gl.get_parameter_string(glow::VERSION),
            renderer = %gl.get_parameter_string(glow::RENDERER),
            "GL context ready",
        );
        let [r, g, b, a] = config.clear_color;
        gl.clear_color(r, g, b, a);
        if config.depth_bits > 0 {
            gl.enable(glow::DEPTH_TEST);
        }
    }

    let mut demo = match unsafe { D::init(&gl) } {
        Ok(demo) => Some(demo),
        Err(err) if err.is_shader() => {
            tracing::error!("{err}");
            None
        }
        Err(err) => return Err(err),
    };

    let mut keys = KeyTracker::default();
    let start = Instant::now();
    tracing::info!(title = %config.title, "running");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => context.resize(size),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    if !keys.update(key, state) {
                        return;
                    }
                    if key == VirtualKeyCode::Escape {
                        *control_flow = ControlFlow::Exit;
                    } else if let Some(demo) = demo.as_mut() {
                        demo.key_pressed(key);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                let size = context.window().inner_size();
                let frame = Frame {
                    elapsed: start.elapsed().as_secs_f32(),
                    width: size.width,
                    height: size.height,
                };
                unsafe { draw_frame(&gl, &frame, demo.as_mut()) };
                if let Err(err) = context.swap_buffers() {
                    tracing::error!("failed to swap buffers: {err}");
                    *control_flow = ControlFlow::ExitWithCode(-1);
                }
            }
            Event::LoopDestroyed => {
                if let Some(demo) = demo.take() {
                    unsafe { demo.destroy(&gl) };
                }
                tracing::info!("exiting");
            }
            _ => {}
        }
    })
}

/// Clear the framebuffer and let the demo draw, unless the window is
/// minimized.
unsafe fn draw_frame<D: Demo>(gl: &glow::Context, frame: &Frame, demo: Option<&mut D>) {
    if frame.aspect().is_none() {
        return;
    }
    unsafe {
        gl.viewport(0, 0, gl_size(frame.width), gl_size(frame.height));
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        if let Some(demo) = demo {
            demo.render(gl, frame);
        }
    }
}
