//! Engine-wide error type
//!
//! Subsystems return `EngineResult<T>` and attach context through their own
//! helper traits (see `assets::error` and `renderer::error`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("malformed asset '{path}': {reason}")]
    AssetFormat { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{component} failed: {error}")]
    SystemError { component: String, error: String },

    #[error("GPU operation '{operation}' failed: {error}")]
    GpuOperationFailed { operation: String, error: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;
