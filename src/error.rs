//! Error types for the map-eval library.

use thiserror::Error;

/// Result type for map-eval operations.
pub type Result<T> = std::result::Result<T, MapEvalError>;

/// Error types that can occur during mAP evaluation.
#[derive(Error, Debug)]
pub enum MapEvalError {
    /// Structurally inconsistent input, e.g. detections for 3 images but
    /// ground truths for 2.
    #[error("Validation error: {0}")]
    Validation(String),

    /// IoU threshold outside `[0, 1]` or not finite.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Malformed evaluation configuration.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
