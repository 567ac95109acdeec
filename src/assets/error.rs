//! Asset subsystem error handling
//!
//! Helpers that turn foreign errors into `EngineError` with the asset path
//! attached.

use crate::error::{EngineError, EngineResult};

/// Helper trait for asset error contexts
pub trait AssetErrorContext<T> {
    /// The asset could not be fetched
    fn asset_load_context(self, path: &str) -> EngineResult<T>;

    /// The asset was fetched but could not be understood
    fn asset_format_context(self, path: &str) -> EngineResult<T>;
}

impl<T, E> AssetErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn asset_load_context(self, path: &str) -> EngineResult<T> {
        self.map_err(|e| asset_load_error(path, e))
    }

    fn asset_format_context(self, path: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::AssetFormat {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Create an asset load error
pub fn asset_load_error(path: &str, reason: impl std::fmt::Display) -> EngineError {
    EngineError::AssetLoad {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
