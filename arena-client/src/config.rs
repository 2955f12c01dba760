//! Backend location and probe settings.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{ClientError, ClientResult};

/// Where the reference Flask backend listens by default.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// How long the capability probe waits before assuming no backend.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1500;

/// Backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Inventory endpoint used as the health probe.
    Slots,
    /// Object detection.
    DetectObjects,
    /// Object removal / editing.
    ObjectEdit,
    /// Sketch-to-image generation.
    SketchToImage,
    /// GAN generation.
    GanGenerate,
}

impl Endpoint {
    /// Absolute path on the backend.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Slots => "/api/slots",
            Self::DetectObjects => "/api/detect_objects",
            Self::ObjectEdit => "/api/object_edit",
            Self::SketchToImage => "/api/sketch_to_image",
            Self::GanGenerate => "/api/gan_generate",
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are resolved against it.
    pub base_url: Url,
    /// Upper bound on the capability probe.
    pub probe_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL is malformed or cannot
    /// carry paths (e.g. `mailto:`).
    pub fn new(base_url: impl AsRef<str>) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url.as_ref()).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        Ok(Self {
            base_url,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            user_agent: format!("vision-arena/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Override the probe timeout.
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Full URL of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the path cannot be joined.
    pub fn endpoint(&self, endpoint: Endpoint) -> ClientResult<Url> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Build the HTTP client shared by the probe and the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client fails to build.
    pub fn http_client(&self) -> ClientResult<Client> {
        Ok(Client::builder().user_agent(&self.user_agent).build()?)
    }
}
