//! Step-by-step OpenGL demos rendered through [glow].
//!
//! Each binary in `src/bin` adds one feature on top of the previous one:
//!
//! 1. `triangle`: a static triangle with per-vertex colors.
//! 2. `animated_triangle`: offset, scale and rotation uniforms driven by
//!    elapsed time ([`animation`]).
//! 3. `camera`: the triangle seen through a look-at view matrix orbiting the
//!    origin.
//! 4. `textured_cube`: a textured cube corner behind a view and a perspective
//!    projection. Space switches between the matrices derived in [`camera`]
//!    and the ones [glam] provides; the picture must not change.
//!
//! The library holds what the demos share: the window and event loop
//! ([`app`]), shader compilation ([`shaders`]), buffer and texture upload
//! ([`gpu`], [`texture`]) and the vertex data ([`geometry`]).
//!
//! # Safety
//!
//! Everything that issues GL calls is `unsafe` and requires the context the
//! objects were created with to be current. [`app::run`] guarantees this for
//! the [`app::Demo`] callbacks.
//!
//! [glow]: https://docs.rs/glow
//! [glam]: https://docs.rs/glam

pub mod animation;
pub mod app;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod gpu;
pub mod logging;
pub mod shaders;
pub mod texture;

mod error;

pub use config::WindowConfig;
pub use error::Error;
