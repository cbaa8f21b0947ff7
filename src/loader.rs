use gl::types::GLuint;
use std::path::Path;

use crate::assets::{AssetReader, FsAssets};
use crate::config::LoaderConfig;
use crate::driver::{ShaderDriver, ShaderStage};
use crate::error::{Result, ShaderError};
use crate::object::GlObject;
use crate::preamble::Preamble;

/// Compiled stage that is deleted when it goes out of scope.
struct StageShader<'a, D: ShaderDriver> {
    driver: &'a D,
    id: GLuint,
}

impl<D: ShaderDriver> Drop for StageShader<'_, D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// Builds GL programs from vertex/fragment source pairs.
///
/// Must be used on the thread that owns the driver's context.
pub struct ShaderLoader<A, D> {
    assets: A,
    driver: D,
    preamble: Preamble,
}

impl<D: ShaderDriver> ShaderLoader<FsAssets, D> {
    pub fn from_config(config: &LoaderConfig, driver: D) -> Self {
        Self::new(
            FsAssets::new(&config.asset_root),
            driver,
            config.resolve_preamble(),
        )
    }
}

impl<A: AssetReader, D: ShaderDriver> ShaderLoader<A, D> {
    pub fn new(assets: A, driver: D, preamble: Preamble) -> Self {
        Self {
            assets,
            driver,
            preamble,
        }
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    /// Loads, compiles and links the shader pair at the given asset paths.
    ///
    /// Returns an empty object on any failure; the reason is logged.
    pub fn load_shaders<P, Q>(&self, vertex_path: P, fragment_path: Q) -> GlObject
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        match self.try_load_shaders(vertex_path, fragment_path) {
            Ok(program) => program,
            Err(err) => {
                log::error!("{}", err);
                GlObject::new()
            }
        }
    }

    pub fn try_load_shaders<P, Q>(&self, vertex_path: P, fragment_path: Q) -> Result<GlObject>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();

        let vertex_raw = self.assets.read_asset_raw(vertex_path);
        let fragment_raw = self.assets.read_asset_raw(fragment_path);

        if vertex_raw.is_empty() {
            return Err(ShaderError::AssetMissing {
                path: vertex_path.to_path_buf(),
            });
        }
        if fragment_raw.is_empty() {
            return Err(ShaderError::AssetMissing {
                path: fragment_path.to_path_buf(),
            });
        }

        let vertex_source = decode_source(ShaderStage::Vertex, vertex_raw)?;
        let fragment_source = decode_source(ShaderStage::Fragment, fragment_raw)?;

        let program = self.build_program(&vertex_source, &fragment_source)?;
        log::debug!(
            "Linked shader program {} from {:?} and {:?}",
            program.get(),
            vertex_path,
            fragment_path
        );
        Ok(program)
    }

    /// Same as `try_load_shaders`, with the sources given directly.
    pub fn load_from_source(&self, vertex_source: &str, fragment_source: &str) -> Result<GlObject> {
        validate_source(ShaderStage::Vertex, vertex_source)?;
        validate_source(ShaderStage::Fragment, fragment_source)?;
        self.build_program(vertex_source, fragment_source)
    }

    fn build_program(&self, vertex_source: &str, fragment_source: &str) -> Result<GlObject> {
        let vertex = self.compile_stage(ShaderStage::Vertex, vertex_source)?;
        let fragment = self.compile_stage(ShaderStage::Fragment, fragment_source)?;

        let id = self
            .driver
            .create_program()
            .map_err(ShaderError::ObjectCreation)?;
        let mut program = GlObject::new();
        if !program.init(id, self.driver.program_deleter()) {
            return Err(ShaderError::ObjectCreation(
                "driver returned program id 0".to_string(),
            ));
        }

        self.driver.attach_shader(id, vertex.id);
        self.driver.attach_shader(id, fragment.id);
        self.driver.link_program(id);

        if !self.driver.link_status(id) {
            return Err(ShaderError::Linking(self.driver.program_info_log(id)));
        }

        self.driver.detach_shader(id, vertex.id);
        self.driver.detach_shader(id, fragment.id);

        Ok(program)
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<StageShader<'_, D>> {
        let id = self
            .driver
            .create_shader(stage)
            .map_err(ShaderError::ObjectCreation)?;
        let shader = StageShader {
            driver: &self.driver,
            id,
        };

        self.driver
            .shader_source(shader.id, &[self.preamble.as_str(), source]);
        self.driver.compile_shader(shader.id);

        if !self.driver.compile_status(shader.id) {
            return Err(ShaderError::Compilation {
                stage,
                log: self.driver.shader_info_log(shader.id),
            });
        }

        Ok(shader)
    }
}

fn decode_source(stage: ShaderStage, raw: Vec<u8>) -> Result<String> {
    let source = String::from_utf8(raw).map_err(|err| ShaderError::InvalidSource {
        stage,
        reason: err.to_string(),
    })?;
    validate_source(stage, &source)?;
    Ok(source)
}

fn validate_source(stage: ShaderStage, source: &str) -> Result<()> {
    if source.contains('\0') {
        return Err(ShaderError::InvalidSource {
            stage,
            reason: "source contains a nul byte".to_string(),
        });
    }
    Ok(())
}
