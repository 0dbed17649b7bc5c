//! Error types for audiograb.

use thiserror::Error;

/// Library-level error type for audiograb operations.
#[derive(Error, Debug)]
pub enum GrabError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input rejected before any download starts.
    #[error("{0}")]
    InvalidInput(String),

    /// Failure reported by the extraction tool. The message is the tool's
    /// own error text so result lines stay readable when truncated.
    #[error("{0}")]
    Extraction(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for audiograb operations.
pub type Result<T> = std::result::Result<T, GrabError>;
