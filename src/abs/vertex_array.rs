//! Vertex array objects.
//!
//! A core-profile context has no default vertex array, so even attribute-less
//! draws need one bound.

use std::sync::Arc;

use super::gl::GlApi;

/// An owned vertex array object, deleted on drop.
pub struct VertexArray<G: GlApi = glow::Context> {
    gl: Arc<G>,
    vao: G::VertexArray,
}

impl<G: GlApi> VertexArray<G> {
    /// Creates a vertex array with no attributes.
    pub fn empty(gl: &Arc<G>) -> Result<Self, String> {
        let vao = gl.create_vertex_array()?;
        Ok(Self {
            gl: Arc::clone(gl),
            vao,
        })
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
    }
}

impl<G: GlApi> Drop for VertexArray<G> {
    fn drop(&mut self) {
        self.gl.bind_vertex_array(None);
        self.gl.delete_vertex_array(self.vao);
    }
}
