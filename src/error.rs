//! Error taxonomy for the request pipeline
//!
//! Dispatch failures and render failures are kept apart so the orchestrator
//! can decide the status class from the variant alone. A missing partial is
//! not an error here: the renderer recovers it in place.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by controller actions
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while resolving and invoking a controller action
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Controller '{controller}' not found")]
    ControllerNotFound { controller: String },

    #[error("Method '{method}' not found on controller '{controller}'")]
    MethodNotFound { controller: String, method: String },

    #[error("Invalid arguments for {controller}.{method}: expected {expected}, got {got}")]
    InvalidArguments {
        controller: String,
        method: String,
        expected: String,
        got: usize,
    },

    #[error("{controller}.{method} returned an invalid result: {reason}")]
    InvalidHandlerResult {
        controller: String,
        method: String,
        reason: String,
    },

    #[error("{controller}.{method} failed: {source}")]
    HandlerError {
        controller: String,
        method: String,
        #[source]
        source: ActionError,
    },
}

impl DispatchError {
    /// Whether this failure means the requested resource does not exist
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ControllerNotFound { .. } | Self::MethodNotFound { .. }
        )
    }
}

/// Failures raised while loading or expanding a view
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("View '{view}' not found")]
    ViewNotFound { view: String, path: PathBuf },

    #[error("Failed to read view '{view}': {source}")]
    ViewIo {
        view: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Partial expansion in '{view}' exceeded {limit} iterations")]
    PartialRecursionExceeded { view: String, limit: usize },

    #[error("Partial expansion in '{view}' grew past {max_bytes} bytes")]
    PartialOutputTooLarge { view: String, max_bytes: usize },

    #[error("Invalid view reference '{view}': {reason}")]
    InvalidView { view: String, reason: &'static str },
}

/// Any failure the orchestrator may receive from one request
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Dispatch(e) => e.is_not_found(),
            Self::Render(_) => false,
        }
    }
}
