//! The seam between the loader and the graphics driver.
//!
//! Every call runs against the context current on the calling thread. Object
//! ids are plain `GLuint`s so the owning wrapper does not depend on a backend.

use gl::types::{GLenum, GLuint};
use std::fmt;

use crate::object::Deleter;

mod gl_backend;
#[cfg(not(target_arch = "wasm32"))]
mod glow_backend;

pub use gl_backend::GlDriver;
#[cfg(not(target_arch = "wasm32"))]
pub use glow_backend::GlowDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shader compiler and program linker entry points of a GL context.
pub trait ShaderDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, String>;

    /// Sets the shader source as the concatenation of `sources`, in order.
    fn shader_source(&self, shader: GLuint, sources: &[&str]);
    fn compile_shader(&self, shader: GLuint);
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> Result<GLuint, String>;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;

    /// Release callback for programs created by this driver.
    fn program_deleter(&self) -> Deleter;
}
