use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::config::LoaderConfig;

/// Installs `SimpleLogger` as the global logger. Fails if one is already set.
pub fn init(level: LevelFilter) -> Result<()> {
    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}

pub fn init_from_config(config: &LoaderConfig) -> Result<()> {
    init(config.level_filter()?)
}
