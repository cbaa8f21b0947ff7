use std::path::PathBuf;
use thiserror::Error;

use crate::driver::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Couldn't open shader: {}", .path.display())]
    AssetMissing { path: PathBuf },

    #[error("Invalid {stage} shader source: {reason}")]
    InvalidSource { stage: ShaderStage, reason: String },

    #[error("Object creation failed: {0}")]
    ObjectCreation(String),

    #[error("Error compiling {stage} shader: {log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("Error linking shader program: {0}")]
    Linking(String),
}

pub type Result<T> = std::result::Result<T, ShaderError>;
