//! CPU-side vertex formats and the meshes the demos draw.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One `float` vertex attribute, located by name in the shader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// The `in` variable name in the vertex shader.
    pub name: &'static str,
    /// Number of `f32` components (1 to 4).
    pub components: i32,
    /// Byte offset inside the vertex.
    pub offset: i32,
}

/// A vertex type that can be uploaded to a vertex buffer.
pub trait VertexLayout: Pod {
    /// The attributes, in memory order.
    const ATTRIBUTES: &'static [Attribute];

    /// Size of one vertex in bytes.
    #[must_use]
    fn stride() -> i32 {
        // Vertices are a handful of floats, well within i32 range.
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        {
            size_of::<Self>() as i32
        }
    }
}

/// Position plus RGB color.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ColorVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Linear RGB.
    pub color: [f32; 3],
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl VertexLayout for ColorVertex {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute {
            name: "a_position",
            components: 3,
            offset: offset_of!(ColorVertex, position) as i32,
        },
        Attribute {
            name: "a_color",
            components: 3,
            offset: offset_of!(ColorVertex, color) as i32,
        },
    ];
}

/// Position plus texture coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TexturedVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Texture coordinate, origin at the bottom-left of the image.
    pub uv: [f32; 2],
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl VertexLayout for TexturedVertex {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute {
            name: "a_position",
            components: 3,
            offset: offset_of!(TexturedVertex, position) as i32,
        },
        Attribute {
            name: "a_uv",
            components: 2,
            offset: offset_of!(TexturedVertex, uv) as i32,
        },
    ];
}

/// The red/green/blue triangle every demo starts from.
pub const TRIANGLE: [ColorVertex; 3] = [
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

/// An indexed triangle mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh<V> {
    /// Vertex data.
    pub vertices: Vec<V>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

// Written out so that an empty mesh does not require `V: Default`.
impl<V> Default for Mesh<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<V> Mesh<V> {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Mesh<TexturedVertex> {
    /// Append a quad spanning `origin`, `origin + right`, `origin + right +
    /// up` and `origin + up`, textured with the whole `[0, 1]²` range.
    ///
    /// The quad is wound counter-clockwise when seen from the side that
    /// `right × up` points to.
    pub fn push_quad(&mut self, origin: Vec3, right: Vec3, up: Vec3) {
        #[expect(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;
        let corners = [
            (origin, [0.0, 0.0]),
            (origin + right, [1.0, 0.0]),
            (origin + right + up, [1.0, 1.0]),
            (origin + up, [0.0, 1.0]),
        ];
        self.vertices
            .extend(corners.iter().map(|(position, uv)| TexturedVertex {
                position: position.to_array(),
                uv: *uv,
            }));
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// The three faces of a unit cube that meet at its `(+½, +½, +½)` corner.
///
/// Seen from a camera in the positive octant this looks like a whole cube,
/// which is the point: it is the cheapest mesh that shows perspective
/// foreshortening along all three axes.
#[must_use]
pub fn cube_corner() -> Mesh<TexturedVertex> {
    const H: f32 = 0.5;
    let mut mesh = Mesh::default();
    // +Z
    mesh.push_quad(Vec3::new(-H, -H, H), Vec3::X, Vec3::Y);
    // +X
    mesh.push_quad(Vec3::new(H, -H, H), Vec3::NEG_Z, Vec3::Y);
    // +Y
    mesh.push_quad(Vec3::new(-H, H, H), Vec3::X, Vec3::NEG_Z);
    mesh
}
