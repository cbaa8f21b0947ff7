use gl::types::*;
use std::os::raw::c_void;

use super::{ShaderDriver, ShaderStage};
use crate::object::Deleter;

/// Driver over the `gl` crate's global function pointers.
///
/// The pointers are process-wide; they must be loaded against the context the
/// calls will run on.
#[derive(Debug, Clone, Copy)]
pub struct GlDriver {
    _loaded: (),
}

impl GlDriver {
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self { _loaded: () }
    }

    /// Uses pointers some earlier `gl::load_with` call installed.
    pub fn from_loaded() -> Option<Self> {
        let loaded = gl::GetError::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::ShaderSource::is_loaded()
            && gl::CompileShader::is_loaded()
            && gl::GetShaderiv::is_loaded()
            && gl::GetShaderInfoLog::is_loaded()
            && gl::DeleteShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::AttachShader::is_loaded()
            && gl::DetachShader::is_loaded()
            && gl::LinkProgram::is_loaded()
            && gl::GetProgramiv::is_loaded()
            && gl::GetProgramInfoLog::is_loaded()
            && gl::DeleteProgram::is_loaded();

        loaded.then_some(Self { _loaded: () })
    }

    fn last_error() -> GLenum {
        unsafe { gl::GetError() }
    }
}

fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }

    let mut buffer: Vec<u8> = vec![0; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.clamp(0, len) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

impl ShaderDriver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, String> {
        let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
        if shader == 0 {
            return Err(format!(
                "glCreateShader({stage}) failed (0x{:x})",
                Self::last_error()
            ));
        }
        Ok(shader)
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let pointers: Vec<*const GLchar> = sources
            .iter()
            .map(|source| source.as_ptr() as *const GLchar)
            .collect();
        let lengths: Vec<GLint> = sources.iter().map(|source| source.len() as GLint).collect();

        unsafe {
            gl::ShaderSource(
                shader,
                sources.len() as GLsizei,
                pointers.as_ptr(),
                lengths.as_ptr(),
            );
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }

        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buffer);
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> Result<GLuint, String> {
        let program = unsafe { gl::CreateProgram() };
        if program == 0 {
            return Err(format!("glCreateProgram failed (0x{:x})", Self::last_error()));
        }
        Ok(program)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }

        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buffer);
        })
    }

    fn program_deleter(&self) -> Deleter {
        Box::new(|program| unsafe { gl::DeleteProgram(program) })
    }
}
