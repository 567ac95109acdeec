//! Renderer error helpers
//!
//! wgpu and winit report failures with their own error types; these helpers
//! fold them into `EngineError` with the failing step attached.

use crate::error::{EngineError, EngineResult};

pub type RendererResult<T> = EngineResult<T>;

pub trait RendererErrorContext<T> {
    fn renderer_context(self, context: &str) -> RendererResult<T>;
}

impl<T, E> RendererErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn renderer_context(self, context: &str) -> RendererResult<T> {
        self.map_err(|e| EngineError::SystemError {
            component: "renderer".to_string(),
            error: format!("{}: {}", context, e),
        })
    }
}

/// Create a GPU operation error
pub fn gpu_operation_error(operation: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::GpuOperationFailed {
        operation: operation.to_string(),
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_names_the_step() {
        let result: Result<(), String> = Err("lost".to_string());
        match result.renderer_context("create surface") {
            Err(EngineError::SystemError { component, error }) => {
                assert_eq!(component, "renderer");
                assert_eq!(error, "create surface: lost");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn gpu_errors_keep_operation() {
        let err = gpu_operation_error("request_adapter", "no adapter");
        assert!(err.to_string().contains("request_adapter"));
    }
}
