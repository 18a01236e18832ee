//! GLSL shader sources and compilation helpers.
//!
//! All shaders target GLSL 3.30 core (OpenGL 3.3), the oldest core profile
//! that every desktop driver, macOS included, still offers.

use glow::HasContext;

use crate::Error;

/// Vertex shader for the static colored triangle.
///
/// Positions are already in clip space.
pub const COLOR_VERTEX_SRC: &str = r"#version 330 core

in vec3 a_position;
in vec3 a_color;

out vec3 v_color;

void main() {
    gl_Position = vec4(a_position, 1.0);
    v_color = a_color;
}
";

/// Vertex shader for the animated triangle.
///
/// Each vertex is scaled, rotated, then offset; see
/// [`TriangleMotion::apply`](crate::animation::TriangleMotion::apply) for the
/// CPU-side mirror of this math.
///
/// # Uniforms
///
/// | Name       | Type    | Description                            |
/// |------------|---------|----------------------------------------|
/// | `u_offset` | `vec2`  | Translation, applied last              |
/// | `u_scale`  | `vec2`  | Per-axis scale, applied first          |
/// | `u_angle`  | `float` | Counter-clockwise rotation in radians  |
pub const ANIMATED_VERTEX_SRC: &str = r"#version 330 core

in vec3 a_position;
in vec3 a_color;

uniform vec2 u_offset;
uniform vec2 u_scale;
uniform float u_angle;

out vec3 v_color;

void main() {
    vec2 p = a_position.xy * u_scale;

    // Weight the rotated basis vectors by the point's coordinates.
    vec2 x_axis = vec2(cos(u_angle), sin(u_angle));
    vec2 y_axis = vec2(-sin(u_angle), cos(u_angle));
    p = x_axis * p.x + y_axis * p.y;

    gl_Position = vec4(p + u_offset, a_position.z, 1.0);
    v_color = a_color;
}
";

/// Vertex shader for the colored triangle seen through a camera.
///
/// # Uniforms
///
/// | Name     | Type   | Description            |
/// |----------|--------|------------------------|
/// | `u_view` | `mat4` | World to eye transform |
pub const VIEW_VERTEX_SRC: &str = r"#version 330 core

in vec3 a_position;
in vec3 a_color;

uniform mat4 u_view;

out vec3 v_color;

void main() {
    gl_Position = u_view * vec4(a_position, 1.0);
    v_color = a_color;
}
";

/// Fragment shader shared by all colored-triangle demos.
pub const COLOR_FRAGMENT_SRC: &str = r"#version 330 core

in vec3 v_color;

out vec4 frag_color;

void main() {
    frag_color = vec4(v_color, 1.0);
}
";

/// Vertex shader for textured meshes.
///
/// # Uniforms
///
/// | Name           | Type   | Description              |
/// |----------------|--------|--------------------------|
/// | `u_view`       | `mat4` | World to eye transform   |
/// | `u_projection` | `mat4` | Eye to clip transform    |
pub const TEXTURED_VERTEX_SRC: &str = r"#version 330 core

in vec3 a_position;
in vec2 a_uv;

uniform mat4 u_view;
uniform mat4 u_projection;

out vec2 v_uv;

void main() {
    gl_Position = u_projection * u_view * vec4(a_position, 1.0);
    v_uv = a_uv;
}
";

/// Fragment shader for textured meshes.
///
/// # Uniforms
///
/// | Name        | Type        | Description         |
/// |-------------|-------------|---------------------|
/// | `u_texture` | `sampler2D` | Bound texture unit  |
pub const TEXTURED_FRAGMENT_SRC: &str = r"#version 330 core

in vec2 v_uv;

uniform sampler2D u_texture;

out vec4 frag_color;

void main() {
    frag_color = texture(u_texture, v_uv);
}
";

/// Compile a shader program from vertex and fragment source strings.
///
/// The compiled shader objects are detached and deleted after successful
/// linking, so only the program handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`Error::Shader`] or [`Error::Link`] carrying the driver's info
/// log if compilation or linking fails.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, Error> {
    let program = unsafe { gl.create_program() }?;

    let vs = match unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) } {
        Ok(vs) => vs,
        Err(err) => {
            unsafe { gl.delete_program(program) };
            return Err(err);
        }
    };
    let fs = match unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe {
                gl.delete_shader(vs);
                gl.delete_program(program);
            }
            return Err(err);
        }
    };

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(Error::Link(log));
        }

        let log = gl.get_program_info_log(program);
        if !log.trim().is_empty() {
            tracing::warn!("program linked with warnings:\n{log}");
        }
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, Error> {
    let stage = if shader_type == glow::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };

    unsafe {
        let shader = gl.create_shader(shader_type)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::Shader { stage, log });
        }

        Ok(shader)
    }
}

/// Look up a uniform location.
///
/// A missing uniform is logged and yields `None`; glow treats uploads to a
/// `None` location as no-ops, so the demo keeps drawing. Drivers drop
/// uniforms the shader never reads, which makes this normal while editing a
/// shader.
///
/// # Safety
///
/// Requires a valid, current OpenGL context; `program` must be linked.
#[must_use]
pub unsafe fn uniform(
    gl: &glow::Context,
    program: glow::Program,
    name: &str,
) -> Option<glow::UniformLocation> {
    warn_if_missing(name, unsafe { gl.get_uniform_location(program, name) })
}

fn warn_if_missing<T>(name: &str, location: Option<T>) -> Option<T> {
    if location.is_none() {
        tracing::warn!(uniform = name, "uniform not found in program; uploads to it are skipped");
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SOURCES: [&str; 6] = [
        COLOR_VERTEX_SRC,
        ANIMATED_VERTEX_SRC,
        VIEW_VERTEX_SRC,
        COLOR_FRAGMENT_SRC,
        TEXTURED_VERTEX_SRC,
        TEXTURED_FRAGMENT_SRC,
    ];

    #[test]
    fn version_directive_comes_first() {
        for src in ALL_SOURCES {
            assert!(src.starts_with("#version 330 core\n"), "{src}");
        }
    }

    #[test]
    fn vertex_shaders_declare_layout_attributes() {
        use crate::geometry::{ColorVertex, TexturedVertex, VertexLayout};

        for src in [COLOR_VERTEX_SRC, ANIMATED_VERTEX_SRC, VIEW_VERTEX_SRC] {
            for attr in ColorVertex::ATTRIBUTES {
                assert!(src.contains(&format!(" {};", attr.name)), "{} missing", attr.name);
            }
        }
        for attr in TexturedVertex::ATTRIBUTES {
            assert!(TEXTURED_VERTEX_SRC.contains(&format!(" {};", attr.name)));
        }
    }

    #[test]
    fn missing_uniform_is_not_an_error() {
        assert_eq!(warn_if_missing("u_view", Some(3)), Some(3));
        assert_eq!(warn_if_missing::<u32>("u_gone", None), None);
    }

    #[test]
    fn demo_uniforms_are_declared() {
        for (src, names) in [
            (ANIMATED_VERTEX_SRC, &["u_offset", "u_scale", "u_angle"][..]),
            (VIEW_VERTEX_SRC, &["u_view"][..]),
            (TEXTURED_VERTEX_SRC, &["u_view", "u_projection"][..]),
            (TEXTURED_FRAGMENT_SRC, &["u_texture"][..]),
        ] {
            for name in names {
                assert!(src.contains(&format!(" {name};")), "{name} missing");
            }
        }
    }

    #[test]
    fn fragment_shaders_consume_vertex_outputs() {
        assert!(COLOR_FRAGMENT_SRC.contains("in vec3 v_color;"));
        assert!(TEXTURED_FRAGMENT_SRC.contains("in vec2 v_uv;"));
    }
}
