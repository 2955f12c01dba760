//! Backend capability probe.

use std::time::Duration;

use arena_core::BackendMode;
use reqwest::Client;
use url::Url;

use crate::{ClientConfig, ClientResult, Endpoint};

/// One-shot check for a reachable backend.
///
/// A single bounded GET to the inventory endpoint. Any ok status means the
/// backend is present; everything else (connection error, timeout, non-ok
/// status) means simulate. Failures never reach the caller.
#[derive(Debug, Clone)]
pub struct CapabilityProbe {
    http: Client,
    endpoint: Url,
    timeout: Duration,
}

impl CapabilityProbe {
    /// Create a probe for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidUrl`] if the probe URL cannot be
    /// built.
    pub fn new(config: &ClientConfig, http: Client) -> ClientResult<Self> {
        Ok(Self {
            http,
            endpoint: config.endpoint(Endpoint::Slots)?,
            timeout: config.probe_timeout,
        })
    }

    /// Run the probe.
    #[tracing::instrument(name = "capability_probe", skip(self), fields(endpoint = %self.endpoint))]
    pub async fn detect(&self) -> BackendMode {
        let result = self
            .http
            .get(self.endpoint.clone())
            .timeout(self.timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Backend available");
                BackendMode::Remote
            }
            Ok(response) => {
                tracing::info!(
                    status = %response.status(),
                    "Backend answered without ok status; using client-side simulator"
                );
                BackendMode::Simulated
            }
            Err(e) => {
                tracing::info!("Backend not reachable; using client-side simulator");
                tracing::debug!(timeout = e.is_timeout(), "Probe error: {e}");
                BackendMode::Simulated
            }
        }
    }
}
