#![allow(dead_code)]

use gl::types::GLuint;
use glshader::driver::{ShaderDriver, ShaderStage};
use glshader::object::Deleter;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::sync::Once;

pub const VALID_VERTEX: &str = "layout (location = 0) in vec3 aPos;\nvoid main() {\n    gl_Position = vec4(aPos, 1.0);\n}\n";
pub const VALID_FRAGMENT: &str = "out vec4 FragColor;\nvoid main() {\n    FragColor = vec4(1.0);\n}\n";
pub const BROKEN_FRAGMENT: &str = "out vec4 FragColor;\nvoid main() {\n    FragColor = vec4(1.0)\n}\n";

#[derive(Debug, Clone)]
pub struct FakeShader {
    pub stage: ShaderStage,
    pub sources: Vec<String>,
    pub compiled: bool,
    pub info_log: String,
}

#[derive(Debug, Clone, Default)]
pub struct FakeProgram {
    pub attached: BTreeSet<GLuint>,
    pub linked: bool,
    pub info_log: String,
}

#[derive(Debug, Default)]
pub struct DriverState {
    next_id: GLuint,
    pub shaders: BTreeMap<GLuint, FakeShader>,
    pub programs: BTreeMap<GLuint, FakeProgram>,
    pub source_calls: Vec<Vec<String>>,
    pub compile_calls: usize,
    pub create_shader_calls: usize,
    pub link_failure: Option<String>,
    pub shader_failure: Option<(ShaderStage, String)>,
    pub program_failure: Option<String>,
    pub null_program: bool,
}

/// Stand-in for a GL context. Compilation fails when a statement line is
/// missing its terminating semicolon, mimicking a real front end.
#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Rc<RefCell<DriverState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::cell::Ref<'_, DriverState> {
        self.state.borrow()
    }

    pub fn fail_next_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    pub fn fail_create_shader(&self, stage: ShaderStage, error: &str) {
        self.state.borrow_mut().shader_failure = Some((stage, error.to_string()));
    }

    pub fn fail_next_create_program(&self, error: &str) {
        self.state.borrow_mut().program_failure = Some(error.to_string());
    }

    /// Makes the next program creation report success with id 0.
    pub fn return_null_program(&self) {
        self.state.borrow_mut().null_program = true;
    }

    pub fn delete_program(&self, program: GLuint) {
        self.state.borrow_mut().programs.remove(&program);
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn is_linked(&self, program: GLuint) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|program| program.linked)
            .unwrap_or(false)
    }

    fn allocate(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

fn check_syntax(source: &str) -> Result<(), String> {
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        let is_statement = !line.is_empty()
            && !line.starts_with('#')
            && !line.starts_with("//")
            && !line.ends_with('{')
            && !line.ends_with('}')
            && !line.ends_with(';');
        if is_statement {
            return Err(format!(
                "0:{}(1): error: syntax error, unexpected '}}', expecting ',' or ';'",
                index + 2
            ));
        }
    }
    Ok(())
}

impl ShaderDriver for FakeDriver {
    fn create_shader(&self, stage: ShaderStage) -> Result<GLuint, String> {
        {
            let mut state = self.state.borrow_mut();
            state.create_shader_calls += 1;
            if let Some((failing, error)) = state.shader_failure.clone() {
                if failing == stage {
                    state.shader_failure = None;
                    return Err(error);
                }
            }
        }

        let id = self.allocate();
        let mut state = self.state.borrow_mut();
        state.shaders.insert(
            id,
            FakeShader {
                stage,
                sources: Vec::new(),
                compiled: false,
                info_log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let sources: Vec<String> = sources.iter().map(|source| source.to_string()).collect();
        let mut state = self.state.borrow_mut();
        state.source_calls.push(sources.clone());
        if let Some(shader) = state.shaders.get_mut(&shader) {
            shader.sources = sources;
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        state.compile_calls += 1;
        if let Some(shader) = state.shaders.get_mut(&shader) {
            match check_syntax(&shader.sources.concat()) {
                Ok(()) => shader.compiled = true,
                Err(log) => {
                    shader.compiled = false;
                    shader.info_log = log;
                }
            }
        }
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|shader| shader.compiled)
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|shader| shader.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<GLuint, String> {
        {
            let mut state = self.state.borrow_mut();
            if let Some(error) = state.program_failure.take() {
                return Err(error);
            }
            if std::mem::take(&mut state.null_program) {
                return Ok(0);
            }
        }

        let id = self.allocate();
        self.state
            .borrow_mut()
            .programs
            .insert(id, FakeProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.insert(shader);
        }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.remove(&shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        let failure = state.link_failure.take();
        let all_compiled = state
            .programs
            .get(&program)
            .map(|p| {
                p.attached.iter().all(|id| {
                    state
                        .shaders
                        .get(id)
                        .map(|shader| shader.compiled)
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false);

        if let Some(program) = state.programs.get_mut(&program) {
            match failure {
                Some(log) => {
                    program.linked = false;
                    program.info_log = log;
                }
                None if !all_compiled => {
                    program.linked = false;
                    program.info_log = "error: linking with uncompiled shader".to_string();
                }
                None => program.linked = true,
            }
        }
    }

    fn link_status(&self, program: GLuint) -> bool {
        self.is_linked(program)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|program| program.info_log.clone())
            .unwrap_or_default()
    }

    fn program_deleter(&self) -> Deleter {
        let driver = self.clone();
        Box::new(move |program| driver.delete_program(program))
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = (record.level(), record.args().to_string());
        CAPTURED.with(|captured| captured.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static INIT_CAPTURE: Once = Once::new();

/// Routes log records into a per-thread buffer.
pub fn capture_logs() {
    INIT_CAPTURE.call_once(|| {
        log::set_logger(&CAPTURE_LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

pub fn logged_errors() -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
