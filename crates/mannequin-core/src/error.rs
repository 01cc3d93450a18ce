//! Error types for Mannequin

use thiserror::Error;

/// Result type alias using Mannequin's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Mannequin operations
#[derive(Error, Debug)]
pub enum Error {
    /// Export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Invalid model data
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding/decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
