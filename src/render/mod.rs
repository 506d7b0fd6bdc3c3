//! The built-in full-screen triangle and the per-frame draw.

use std::sync::Arc;

use crate::abs::{GlApi, ShaderProgram, ShaderStage, VertexArray};
use crate::config::GlProfile;

const FULLSCREEN_VERT: &str = include_str!("shaders/fullscreen/vert.glsl");
const FULLSCREEN_FRAG: &str = include_str!("shaders/fullscreen/frag.glsl");

/// The `#version` preamble matching the requested context.
pub fn glsl_header(profile: GlProfile, major: u8, minor: u8) -> String {
    match profile {
        GlProfile::Gles => "#version 300 es\nprecision mediump float;\n".to_string(),
        GlProfile::Core if (major, minor) >= (3, 3) => {
            format!("#version {}{}0 core\n", major, minor)
        }
        GlProfile::Core if (major, minor) == (3, 2) => "#version 150\n".to_string(),
        GlProfile::Core if (major, minor) == (3, 1) => "#version 140\n".to_string(),
        // gl_VertexID needs at least GLSL 1.30
        GlProfile::Core => "#version 130\n".to_string(),
    }
}

/// Vertex and fragment stages drawing one triangle that covers the viewport,
/// colored by its interpolated texture coordinates.
pub fn fullscreen_stages(header: &str) -> [ShaderStage; 2] {
    [
        ShaderStage::vertex(format!("{}{}", header, FULLSCREEN_VERT)),
        ShaderStage::fragment(format!("{}{}", header, FULLSCREEN_FRAG)),
    ]
}

/// The GL objects the render loop draws with: the full-screen program and
/// the empty vertex array it is drawn from.
pub struct FullscreenPass<G: GlApi = glow::Context> {
    program: ShaderProgram<G>,
    _vertex_array: VertexArray<G>,
}

impl<G: GlApi> FullscreenPass<G> {
    /// Builds the program, then binds it together with an empty vertex array.
    pub fn new(gl: &Arc<G>, header: &str) -> Result<Self, String> {
        let program = ShaderProgram::new(gl, &fullscreen_stages(header))?;
        let vertex_array = VertexArray::empty(gl)?;

        vertex_array.bind();
        program.use_program();

        Ok(Self {
            program,
            _vertex_array: vertex_array,
        })
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }
}

/// Issues the single draw call of a frame using the bound program.
pub fn draw_frame<G: GlApi>(gl: &G) {
    gl.draw_arrays(glow::TRIANGLES, 0, 3);
}

/// Logs a warning if the GL error flag is set. Returns the error code.
pub fn check_errors<G: GlApi>(gl: &G) -> u32 {
    let error = gl.error();
    if error != glow::NO_ERROR {
        log::warn!("OpenGL error 0x{:04X} after drawing", error);
    }
    error
}
