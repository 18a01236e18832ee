//! Image decoding and texture upload.

use std::path::Path;

use glow::{HasContext, PixelUnpackData};

use crate::gpu::gl_size;
use crate::Error;

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Decoded RGBA8 pixels ready for upload.
///
/// Rows are stored bottom-up, matching GL's texture coordinate origin, so a
/// `uv` of `(0, 0)` samples the image's bottom-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    /// Tightly packed RGBA bytes, `width * height * 4` long.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TextureImage {
    /// Decode an encoded image (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the format is unknown or the data is
    /// corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_rgba(image::load_from_memory(bytes)?.to_rgba8()))
    }

    /// Read and decode an image file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Image`]
    /// if it cannot be decoded.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::decode(&bytes)
    }

    /// A gray and white checkerboard, `size` pixels square with `cell`-pixel
    /// cells.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is zero.
    #[must_use]
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        assert!(cell > 0, "checkerboard cell size must be non-zero");
        let img = image::RgbaImage::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                image::Rgba([235, 235, 235, 255])
            } else {
                image::Rgba([90, 90, 100, 255])
            }
        });
        Self::from_rgba(img)
    }

    fn from_rgba(img: image::RgbaImage) -> Self {
        let img = image::imageops::flip_vertical(&img);
        let (width, height) = img.dimensions();
        Self {
            pixels: img.into_raw(),
            width,
            height,
        }
    }
}

/// Upload `image` into a new mipmapped, repeating 2D texture.
///
/// The texture is left unbound.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`Error::Gl`] if the texture object cannot be created.
pub unsafe fn upload(gl: &glow::Context, image: &TextureImage) -> Result<glow::Texture, Error> {
    let texture = unsafe { gl.create_texture() }?;
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            RGBA8_INTERNAL_FORMAT,
            gl_size(image.width),
            gl_size(image.height),
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(&image.pixels)),
        );
        gl.generate_mipmap(glow::TEXTURE_2D);
        set_tex_params(gl);
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
    Ok(texture)
}

/// Trilinear filtering and repeat wrapping on the bound 2D texture.
unsafe fn set_tex_params(gl: &glow::Context) {
    // GL constant values are small enough that the cast is always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe {
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
    }
}
