//! Error types for core model operations.

use thiserror::Error;

/// Result type for core model operations.
pub type ArenaResult<T> = Result<T, ArenaError>;

/// Errors that can occur while building or reading model values.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// An edit action string was neither `keep` nor `remove`.
    #[error("Invalid edit action: {0}")]
    InvalidAction(String),

    /// A selector refers to a detection that is no longer in the session.
    #[error("Selection #{index} does not match any of the {len} stored detections")]
    StaleSelection {
        /// Zero-based selector index.
        index: usize,
        /// Number of detections currently stored.
        len: usize,
    },
}
