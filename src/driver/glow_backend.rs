use gl::types::GLuint;
use glow::HasContext;
use std::num::NonZeroU32;
use std::sync::Arc;

use super::{ShaderDriver, ShaderStage};
use crate::object::Deleter;

/// Driver over a shared `glow` context.
#[derive(Clone)]
pub struct GlowDriver {
    gl: Arc<glow::Context>,
}

impl GlowDriver {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }
}

fn native_shader(id: GLuint) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn native_program(id: GLuint) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

impl ShaderDriver for GlowDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, String> {
        let shader = unsafe { self.gl.create_shader(stage.gl_enum())? };
        Ok(shader.0.get())
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let Some(shader) = native_shader(shader) else {
            return;
        };
        let source = sources.concat();
        unsafe { self.gl.shader_source(shader, &source) };
    }

    fn compile_shader(&self, shader: GLuint) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.compile_shader(shader) };
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        native_shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        native_shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: GLuint) {
        if let Some(shader) = native_shader(shader) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn create_program(&self) -> Result<GLuint, String> {
        let program = unsafe { self.gl.create_program()? };
        Ok(program.0.get())
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        if let (Some(program), Some(shader)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        if let (Some(program), Some(shader)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.detach_shader(program, shader) };
        }
    }

    fn link_program(&self, program: GLuint) {
        if let Some(program) = native_program(program) {
            unsafe { self.gl.link_program(program) };
        }
    }

    fn link_status(&self, program: GLuint) -> bool {
        native_program(program)
            .map(|program| unsafe { self.gl.get_program_link_status(program) })
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        native_program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn program_deleter(&self) -> Deleter {
        let gl = Arc::clone(&self.gl);
        Box::new(move |program| {
            if let Some(program) = native_program(program) {
                unsafe { gl.delete_program(program) };
            }
        })
    }
}
