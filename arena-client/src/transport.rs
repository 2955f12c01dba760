//! Transport facade over the four feature endpoints.
//!
//! In [`BackendMode::Remote`] each operation sends the request verbatim and
//! returns the backend response untouched. In [`BackendMode::Simulated`] the
//! [`Simulator`] answers without any network I/O.

use arena_core::{BackendMode, EditRequest, GanRequest, SketchParams};
use arena_renderer::codec::RasterFormat;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;

use crate::{CapabilityProbe, ClientConfig, ClientResult, Endpoint, Reply, Simulator};

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// File name given to the sketch upload.
const SKETCH_FILE_NAME: &str = "sketch.png";

/// A user-chosen image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Original file name, forwarded in the multipart part.
    pub file_name: String,
}

impl ImageUpload {
    /// Wrap file contents.
    #[must_use]
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
        }
    }

    /// MIME type sniffed from the file's magic bytes.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        RasterFormat::from_magic_bytes(&self.bytes).mime()
    }
}

/// A sketch exported from the pad, plus its generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchUpload {
    /// PNG bytes of the sketch canvas.
    pub png: Vec<u8>,
    /// Text fields forwarded with the image.
    pub params: SketchParams,
}

impl SketchUpload {
    /// Pair a PNG with its parameters.
    #[must_use]
    pub fn new(png: Vec<u8>, params: SketchParams) -> Self {
        Self { png, params }
    }
}

/// Routes feature calls to the backend or to the simulator.
#[derive(Debug, Clone)]
pub struct Transport {
    mode: BackendMode,
    http: Client,
    config: ClientConfig,
    simulator: Simulator,
}

impl Transport {
    /// Create a transport with a known mode.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Http`] if the HTTP client fails to build.
    pub fn new(mode: BackendMode, config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_client(mode, config, config.http_client()?))
    }

    /// Create a transport that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(mode: BackendMode, config: &ClientConfig, http: Client) -> Self {
        Self {
            mode,
            http,
            config: config.clone(),
            simulator: Simulator,
        }
    }

    /// Probe the backend once and build a transport for the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the client or probe URL cannot be built; an
    /// unreachable backend yields a simulated transport.
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.http_client()?;
        let mode = CapabilityProbe::new(config, http.clone())?.detect().await;
        Ok(Self::with_client(mode, config, http))
    }

    /// Mode fixed at construction.
    #[must_use]
    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Backend configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload an image for object detection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent. A non-ok status is not
    /// an error; check [`Reply::ok`].
    #[tracing::instrument(skip_all, fields(mode = %self.mode, file = %upload.file_name))]
    pub async fn detect_objects(&self, upload: &ImageUpload) -> ClientResult<Reply> {
        if !self.mode.is_remote() {
            return simulated(&self.simulator.detect_objects(upload));
        }

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime())?;
        let form = Form::new().part(IMAGE_FIELD, part);
        self.send_multipart(Endpoint::DetectObjects, form).await
    }

    /// Ask the backend to keep or remove the detected objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    #[tracing::instrument(skip_all, fields(mode = %self.mode, actions = request.actions.len()))]
    pub async fn object_edit(&self, request: &EditRequest) -> ClientResult<Reply> {
        if !self.mode.is_remote() {
            return simulated(&self.simulator.object_edit(request));
        }
        self.send_json(Endpoint::ObjectEdit, request).await
    }

    /// Generate an image from a sketch.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    #[tracing::instrument(
        skip_all,
        fields(
            mode = %self.mode,
            guidance_scale = %upload.params.guidance_scale,
            num_steps = %upload.params.num_steps
        )
    )]
    pub async fn sketch_to_image(&self, upload: &SketchUpload) -> ClientResult<Reply> {
        if !self.mode.is_remote() {
            return simulated(&self.simulator.sketch_to_image(upload));
        }

        let part = Part::bytes(upload.png.clone())
            .file_name(SKETCH_FILE_NAME)
            .mime_str(arena_core::PNG_MIME)?;
        let form = Form::new()
            .part(IMAGE_FIELD, part)
            .text("guidance_scale", upload.params.guidance_scale.clone())
            .text("num_steps", upload.params.num_steps.clone());
        self.send_multipart(Endpoint::SketchToImage, form).await
    }

    /// Sample the GAN.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or, when simulated, the
    /// noise image cannot be encoded.
    #[tracing::instrument(
        skip_all,
        fields(mode = %self.mode, latent_dim = request.latent_dim, noise_scale = request.noise_scale)
    )]
    pub async fn gan_generate(&self, request: &GanRequest) -> ClientResult<Reply> {
        if !self.mode.is_remote() {
            return simulated(&self.simulator.gan_generate(request)?);
        }
        self.send_json(Endpoint::GanGenerate, request).await
    }

    async fn send_multipart(&self, endpoint: Endpoint, form: Form) -> ClientResult<Reply> {
        let url = self.config.endpoint(endpoint)?;
        let response = self.http.post(url).multipart(form).send().await?;
        tracing::debug!(status = %response.status(), "{} answered", endpoint.path());
        Ok(Reply::Remote(response))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> ClientResult<Reply> {
        let url = self.config.endpoint(endpoint)?;
        let response = self.http.post(url).json(body).send().await?;
        tracing::debug!(status = %response.status(), "{} answered", endpoint.path());
        Ok(Reply::Remote(response))
    }
}

fn simulated<T: Serialize>(body: &T) -> ClientResult<Reply> {
    Ok(Reply::Simulated(serde_json::to_value(body)?))
}
