//! Uniform reply type for real and simulated calls.

use serde::de::DeserializeOwned;

use crate::ClientResult;

/// What a transport operation hands back.
///
/// Callers check [`Reply::ok`] before decoding with [`Reply::json`]. Remote
/// replies are the untouched HTTP response; simulated replies are always ok.
#[derive(Debug)]
pub enum Reply {
    /// Response from the real backend.
    Remote(reqwest::Response),
    /// Body synthesized by the simulator.
    Simulated(serde_json::Value),
}

impl Reply {
    /// Check for a 2xx status (always true when simulated).
    #[must_use]
    pub fn ok(&self) -> bool {
        match self {
            Self::Remote(response) => response.status().is_success(),
            Self::Simulated(_) => true,
        }
    }

    /// HTTP status code (200 when simulated).
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Remote(response) => response.status().as_u16(),
            Self::Simulated(_) => 200,
        }
    }

    /// Check if the reply was synthesized locally.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Http`] if the body cannot be read and
    /// [`crate::ClientError::Decode`] if it is not the expected JSON.
    pub async fn json<T: DeserializeOwned>(self) -> ClientResult<T> {
        match self {
            Self::Remote(response) => {
                let bytes = response.bytes().await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            Self::Simulated(value) => Ok(serde_json::from_value(value)?),
        }
    }
}
