//! Vertex array and buffer objects.

use glow::HasContext;

use crate::geometry::{Attribute, Mesh, VertexLayout};
use crate::Error;

/// A mesh uploaded once and drawn every frame.
///
/// Meshes without indices are drawn with `glDrawArrays`, indexed ones with
/// `glDrawElements`.
#[derive(Debug)]
pub struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: i32,
}

impl GpuMesh {
    /// Upload a non-indexed vertex list.
    ///
    /// Attributes are bound by name, so the same vertex type works with any
    /// program that declares its attributes.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context; `program` must be linked.
    ///
    /// # Errors
    ///
    /// Returns an error if a GL object cannot be created or the program lacks
    /// one of the vertex type's attributes.
    pub unsafe fn from_vertices<V: VertexLayout>(
        gl: &glow::Context,
        program: glow::Program,
        vertices: &[V],
    ) -> Result<Self, Error> {
        let (vao, vbo) = unsafe { upload_vertices(gl, program, vertices) }?;
        unsafe { gl.bind_vertex_array(None) };

        Ok(Self {
            vao,
            vbo,
            ebo: None,
            count: gl_count(vertices.len()),
        })
    }

    /// Upload an indexed mesh.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context; `program` must be linked.
    ///
    /// # Errors
    ///
    /// See [`from_vertices`](Self::from_vertices).
    pub unsafe fn from_mesh<V: VertexLayout>(
        gl: &glow::Context,
        program: glow::Program,
        mesh: &Mesh<V>,
    ) -> Result<Self, Error> {
        let (vao, vbo) = unsafe { upload_vertices(gl, program, &mesh.vertices) }?;

        let ebo = unsafe {
            let ebo = match gl.create_buffer() {
                Ok(ebo) => ebo,
                Err(err) => {
                    gl.bind_vertex_array(None);
                    gl.delete_buffer(vbo);
                    gl.delete_vertex_array(vao);
                    return Err(err.into());
                }
            };
            // The element buffer binding is part of the VAO state, so it must
            // be bound while the VAO still is.
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&mesh.indices),
                glow::STATIC_DRAW,
            );
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
            ebo
        };
        tracing::debug!(triangles = mesh.triangle_count(), "uploaded indexed mesh");

        Ok(Self {
            vao,
            vbo,
            ebo: Some(ebo),
            count: gl_count(mesh.indices.len()),
        })
    }

    /// Draw the mesh as triangles with whatever program is bound.
    ///
    /// # Safety
    ///
    /// Requires the context the mesh was created with to be current.
    pub unsafe fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                gl.draw_elements(glow::TRIANGLES, self.count, glow::UNSIGNED_INT, 0);
            } else {
                gl.draw_arrays(glow::TRIANGLES, 0, self.count);
            }
            gl.bind_vertex_array(None);
        }
    }

    /// Release the GL objects.
    ///
    /// # Safety
    ///
    /// Must be called with the context the mesh was created with, and at
    /// most once.
    pub unsafe fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }
        }
    }
}

/// Create a VAO and a VBO holding `vertices` and describe the vertex layout.
///
/// Attribute locations are resolved before any GL object is created, so a
/// program lacking an attribute leaves nothing behind. On success the VAO is
/// left bound.
unsafe fn upload_vertices<V: VertexLayout>(
    gl: &glow::Context,
    program: glow::Program,
    vertices: &[V],
) -> Result<(glow::VertexArray, glow::Buffer), Error> {
    let locations =
        resolve_attributes::<V>(|name| unsafe { gl.get_attrib_location(program, name) })?;

    unsafe {
        let vao = gl.create_vertex_array()?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                gl.delete_vertex_array(vao);
                return Err(err.into());
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        for (location, attr) in locations {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(
                location,
                attr.components,
                glow::FLOAT,
                false,
                V::stride(),
                attr.offset,
            );
        }

        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        Ok((vao, vbo))
    }
}

/// Pair each of `V`'s attributes with the location `lookup` finds for it.
fn resolve_attributes<V: VertexLayout>(
    mut lookup: impl FnMut(&'static str) -> Option<u32>,
) -> Result<Vec<(u32, &'static Attribute)>, Error> {
    V::ATTRIBUTES
        .iter()
        .map(|attr| {
            lookup(attr.name)
                .map(|location| (location, attr))
                .ok_or(Error::MissingAttribute(attr.name))
        })
        .collect()
}

/// Convert an element count to the `i32` GL draw calls expect.
///
/// # Panics
///
/// Panics if `count > i32::MAX`, which no demo mesh comes near.
fn gl_count(count: usize) -> i32 {
    i32::try_from(count).expect("element count exceeds i32::MAX")
}

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// window and texture dimensions.
pub(crate) fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}
