use std::future::Future;
use std::path::PathBuf;

use super::error::AssetErrorContext;
use crate::error::EngineResult;

/// Where asset bytes come from
pub trait AssetSource {
    /// Read the whole resource at `uri` (forward-slash separated, relative
    /// to the source root)
    fn read(&self, uri: &str) -> impl Future<Output = EngineResult<Vec<u8>>>;
}

/// Reads assets from a directory on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileSource {
    fn read(&self, uri: &str) -> impl Future<Output = EngineResult<Vec<u8>>> {
        let path = self.root.join(uri);
        let uri = uri.to_string();
        async move { std::fs::read(&path).asset_load_context(&uri) }
    }
}
