use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::preamble::{Preamble, TargetPlatform};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Directory relative asset paths are resolved against.
    pub asset_root: PathBuf,
    #[serde(default)]
    pub target: TargetPlatform,
    /// Replaces the platform preamble when set.
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            target: TargetPlatform::current(),
            preamble: None,
            log_level: default_log_level(),
        }
    }
}

impl LoaderConfig {
    pub fn resolve_preamble(&self) -> Preamble {
        match &self.preamble {
            Some(text) => Preamble::custom(text.clone()),
            None => Preamble::for_platform(self.target),
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log level: {}", self.log_level))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse loader config")
    }
}

/// Reads the config at `path`, writing a default one there first if missing.
pub fn load_or_create_config(path: &Path) -> Result<LoaderConfig> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !path.exists() {
        let default_config = LoaderConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        std::fs::write(path, toml_content).context("Failed to write default config")?;
        return Ok(default_config);
    }

    let content = std::fs::read_to_string(path).context("Failed to read config file")?;
    LoaderConfig::from_toml(&content)
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "glshader", "glshader")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("loader.toml"))
}
