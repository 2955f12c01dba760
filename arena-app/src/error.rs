//! Feature-level error taxonomy and the alert text shown for each failure.

use std::fmt;

use arena_client::{ClientError, ClientResult, Reply};
use arena_core::ArenaError;
use arena_renderer::RenderError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Result type for feature controller operations.
pub type FeatureResult<T> = Result<T, FeatureError>;

/// The user-facing operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Object detection.
    Detect,
    /// Applying keep/remove actions.
    Edit,
    /// Sketch-to-image generation.
    Sketch,
    /// GAN generation.
    Gan,
}

impl Feature {
    /// Alert text shown when the backend rejects this feature's request.
    #[must_use]
    pub fn failure_text(self) -> &'static str {
        match self {
            Self::Detect => "Detection failed",
            Self::Edit => "Edit failed",
            Self::Sketch => "Sketch generation failed.",
            Self::Gan => "GAN generation failed",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detect => write!(f, "detect"),
            Self::Edit => write!(f, "edit"),
            Self::Sketch => write!(f, "sketch"),
            Self::Gan => write!(f, "gan"),
        }
    }
}

/// Errors surfaced by the feature controllers.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Detect was triggered without a chosen file.
    #[error("no image selected")]
    NoImageSelected,

    /// Apply was triggered before a detection produced any boxes.
    #[error("no detections to edit")]
    NoDetections,

    /// A numeric field could not be parsed.
    #[error("invalid value for {field}: {value:?}")]
    InvalidInput {
        /// Field name.
        field: &'static str,
        /// Raw text entered.
        value: String,
    },

    /// A selector no longer matches the stored detections.
    #[error("selection #{index} is out of range for {len} detections")]
    StaleSelection {
        /// Zero-based selector index.
        index: usize,
        /// Number of stored detections.
        len: usize,
    },

    /// The backend answered with a non-ok status.
    #[error("{feature} request rejected with HTTP {status}")]
    Rejected {
        /// Feature that was called.
        feature: Feature,
        /// HTTP status code.
        status: u16,
    },

    /// The call could not be completed.
    #[error("{feature} request failed: {source}")]
    Client {
        /// Feature that was called.
        feature: Feature,
        /// Underlying client error.
        #[source]
        source: ClientError,
    },

    /// A result image could not be decoded or drawn.
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl FeatureError {
    /// Wrap a client error raised while serving `feature`.
    #[must_use]
    pub fn client(feature: Feature) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Client { feature, source }
    }

    /// Text for the alert hook.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoImageSelected => "Please choose an image first.".to_string(),
            Self::NoDetections => "No detections yet.".to_string(),
            Self::InvalidInput { field, value } => format!("Invalid {field}: {value}"),
            Self::StaleSelection { .. } => {
                "Detections changed; run detection again.".to_string()
            }
            Self::Rejected { feature, .. } | Self::Client { feature, .. } => {
                feature.failure_text().to_string()
            }
            Self::Render(_) => "Could not display image".to_string(),
        }
    }

    /// Check if the request was superseded by a newer one.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Client {
                source: ClientError::Cancelled,
                ..
            }
        )
    }
}

impl From<ArenaError> for FeatureError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::StaleSelection { index, len } => Self::StaleSelection { index, len },
            ArenaError::InvalidAction(value) => Self::InvalidInput {
                field: "action",
                value,
            },
        }
    }
}

/// Check a transport outcome and decode its body.
///
/// `outcome` is what a [`arena_client::CancelSlot`] hands back: the slot's
/// own result wrapping the transport's.
pub(crate) async fn accept_reply<T: DeserializeOwned>(
    feature: Feature,
    outcome: ClientResult<ClientResult<Reply>>,
) -> FeatureResult<T> {
    let reply = outcome
        .and_then(|reply| reply)
        .map_err(FeatureError::client(feature))?;

    if !reply.ok() {
        return Err(FeatureError::Rejected {
            feature,
            status: reply.status(),
        });
    }

    reply.json().await.map_err(FeatureError::client(feature))
}
