//! The crate-wide error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while bringing a demo up.
///
/// GL calls made once the demo is running do not report errors; only setup
/// (window, context, shaders, buffers, textures) does.
#[derive(Debug, Error)]
pub enum Error {
    /// The window or its GL context could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] glutin::CreationError),
    /// The GL context could not be made current, so no GL function can be
    /// loaded.
    #[error("failed to make GL context current: {0}")]
    Context(#[from] glutin::ContextError),
    /// A GL object could not be created (the driver reports these as
    /// strings).
    #[error("GL error: {0}")]
    Gl(String),
    /// A shader stage failed to compile. Carries the stage name and the
    /// driver's info log.
    #[error("failed to compile {stage} shader:\n{log}")]
    Shader {
        /// `"vertex"` or `"fragment"`.
        stage: &'static str,
        /// The shader info log.
        log: String,
    },
    /// The program failed to link.
    #[error("failed to link program:\n{0}")]
    Link(String),
    /// A vertex attribute is absent from the linked program.
    #[error("attribute `{0}` not found in program")]
    MissingAttribute(&'static str),
    /// An image could not be decoded.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    /// An asset could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl Error {
    /// Whether this error comes from shader compilation or linking.
    ///
    /// The event loop keeps running after these, drawing only the clear
    /// color.
    #[must_use]
    pub fn is_shader(&self) -> bool {
        matches!(
            self,
            Self::Shader { .. } | Self::Link(_) | Self::MissingAttribute(_)
        )
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::Gl(err)
    }
}
