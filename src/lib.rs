pub mod assets;
pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod logging;
pub mod object;
pub mod preamble;

// Re-export commonly used types
pub use assets::{AssetReader, FsAssets, MemoryAssets};
pub use config::LoaderConfig;
pub use driver::{GlDriver, ShaderDriver, ShaderStage};
#[cfg(not(target_arch = "wasm32"))]
pub use driver::GlowDriver;
pub use error::ShaderError;
pub use loader::ShaderLoader;
pub use object::{GlObject, SharedGlObject};
pub use preamble::{Preamble, TargetPlatform};
