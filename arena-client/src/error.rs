//! Client error types.

use arena_renderer::RenderError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when calling a feature backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend base URL is invalid.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, body read, etc.).
    #[error("backend HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the expected JSON.
    #[error("failed to parse backend payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The simulator could not produce an image.
    #[error("simulator image error: {0}")]
    Image(#[from] RenderError),

    /// The request was superseded by a newer one.
    #[error("request cancelled")]
    Cancelled,
}
