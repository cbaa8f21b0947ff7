use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Source of raw asset bytes. An absent or unreadable asset reads as empty.
pub trait AssetReader {
    fn read_asset_raw(&self, path: &Path) -> Vec<u8>;
}

impl<T: AssetReader + ?Sized> AssetReader for &T {
    fn read_asset_raw(&self, path: &Path) -> Vec<u8> {
        (**self).read_asset_raw(path)
    }
}

/// Reads assets from disk, resolving relative paths under `root`.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetReader for FsAssets {
    fn read_asset_raw(&self, path: &Path) -> Vec<u8> {
        let full_path = self.resolve(path);
        match std::fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::debug!("Failed to read asset {:?}: {}", full_path, err);
                Vec::new()
            }
        }
    }
}

/// In-memory assets, used for built-in shaders.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    entries: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>, B: Into<Vec<u8>>>(&self, path: P, bytes: B) {
        self.entries.write().insert(path.into(), bytes.into());
    }

    pub fn with<P: Into<PathBuf>, B: Into<Vec<u8>>>(self, path: P, bytes: B) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn remove(&self, path: &Path) -> Option<Vec<u8>> {
        self.entries.write().remove(path)
    }
}

impl AssetReader for MemoryAssets {
    fn read_asset_raw(&self, path: &Path) -> Vec<u8> {
        self.entries.read().get(path).cloned().unwrap_or_default()
    }
}
