//! This module contains the OpenGL-facing pieces of the application:
//! window and context setup, the GL entry points it uses, shader management
//! and vertex arrays.

pub mod app;
pub mod gl;
pub mod shader;
pub mod vertex_array;

pub use app::*;
pub use gl::GlApi;
pub use shader::*;
pub use vertex_array::*;
