//! Window and context settings.
//!
//! The demos take no command-line flags; each starts from
//! [`WindowConfig::default`] and adjusts it in code.

/// How the window and its GL context are created.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
    /// Requested core-profile GL version as `(major, minor)`.
    pub gl_version: (u8, u8),
    /// MSAA samples per pixel; `0` disables multisampling.
    pub samples: u16,
    /// Depth buffer bits; `0` for no depth buffer.
    pub depth_bits: u8,
    /// Wait for vertical blank on swap.
    pub vsync: bool,
    /// RGBA the framebuffer is cleared to every frame.
    pub clear_color: [f32; 4],
}

impl WindowConfig {
    /// Start from the defaults with a different title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "opengl".to_owned(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            samples: 4,
            depth_bits: 24,
            // Uncapped frame rate, so animation smoothness depends only on
            // the elapsed-time math.
            vsync: false,
            clear_color: [0.2, 0.3, 0.4, 1.0],
        }
    }
}
