//! In-process stand-in for the feature backends.
//!
//! Produces responses of the right shape without any inference: images are
//! echoed back, detection finds nothing and the GAN returns noise.

use arena_core::{DetectionResult, EditRequest, EditResponse, GanRequest, GeneratedImage};
use arena_renderer::codec::{create_noise, encode_base64, encode_png};

use crate::transport::{ImageUpload, SketchUpload};
use crate::ClientResult;

/// Edge length of the simulated GAN output.
pub const GAN_IMAGE_SIZE: u32 = 128;

/// Offline simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulator;

#[allow(clippy::unused_self)]
impl Simulator {
    /// No detections; the upload is echoed as the annotated image.
    #[must_use]
    pub fn detect_objects(&self, upload: &ImageUpload) -> DetectionResult {
        DetectionResult {
            bboxes: Vec::new(),
            annotated_image: encode_base64(&upload.bytes),
        }
    }

    /// The request image is returned unchanged; actions are ignored.
    #[must_use]
    pub fn object_edit(&self, request: &EditRequest) -> EditResponse {
        EditResponse {
            edited_image: request.image.clone(),
        }
    }

    /// The sketch itself is the generated image.
    #[must_use]
    pub fn sketch_to_image(&self, upload: &SketchUpload) -> GeneratedImage {
        GeneratedImage {
            generated_image: encode_base64(&upload.png),
        }
    }

    /// A 128x128 PNG of random opaque pixels. The request is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Image`] if PNG encoding fails.
    pub fn gan_generate(&self, request: &GanRequest) -> ClientResult<GeneratedImage> {
        tracing::trace!(
            latent_dim = request.latent_dim,
            noise_scale = request.noise_scale,
            "Simulating GAN output"
        );
        let png = encode_png(&create_noise(GAN_IMAGE_SIZE, GAN_IMAGE_SIZE))?;
        Ok(GeneratedImage {
            generated_image: encode_base64(&png),
        })
    }
}
