//! GAN playground.

use arena_client::{CancelSlot, Transport};
use arena_core::{GanRequest, GeneratedImage, ImagePayload};

use crate::error::{accept_reply, Feature, FeatureError, FeatureResult};
use crate::hooks::GanView;

/// Controller for the GAN feature.
#[derive(Debug)]
pub struct GanController {
    transport: Transport,
    slot: CancelSlot,
}

impl GanController {
    /// Create a controller.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            slot: CancelSlot::new(),
        }
    }

    /// Sample the generator with the values in the view.
    ///
    /// # Errors
    ///
    /// Fails with [`FeatureError::InvalidInput`] before any request if a
    /// field is not a number, and [`FeatureError::Rejected`] on a non-ok
    /// reply.
    pub async fn generate(&self, view: &impl GanView) -> FeatureResult<ImagePayload> {
        let request = parse_request(&view.latent_dim(), &view.noise_scale())?;

        let outcome = self.slot.run(self.transport.gan_generate(&request)).await;
        let generated: GeneratedImage = accept_reply(Feature::Gan, outcome).await?;

        view.show_generated(&generated.generated_image.to_data_url());
        Ok(generated.generated_image)
    }
}

/// Parse the two text fields into a request.
///
/// # Errors
///
/// Returns [`FeatureError::InvalidInput`] naming the first bad field.
pub fn parse_request(latent_dim: &str, noise_scale: &str) -> FeatureResult<GanRequest> {
    let latent_dim = latent_dim
        .trim()
        .parse::<i64>()
        .map_err(|_| FeatureError::InvalidInput {
            field: "latent_dim",
            value: latent_dim.to_string(),
        })?;

    // NaN and infinities have no JSON form
    let noise_scale = noise_scale
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FeatureError::InvalidInput {
            field: "noise_scale",
            value: noise_scale.to_string(),
        })?;

    Ok(GanRequest {
        latent_dim,
        noise_scale,
    })
}
