//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while decoding, encoding or drawing images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Base64 text could not be decoded.
    #[error("Failed to decode base64: {0}")]
    Base64(String),

    /// Raster bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Raster could not be encoded.
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// A data URI was malformed.
    #[error("Invalid data URI: {0}")]
    DataUri(String),

    /// The background decode task did not complete.
    #[error("Decode task failed: {0}")]
    Task(String),
}
