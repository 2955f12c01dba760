//! UI hooks the host implements for each feature.
//!
//! Controllers never touch a concrete UI. They read inputs and push results
//! through these traits, and report failures through [`Alerts`].

use arena_client::ImageUpload;
use arena_core::{ActionSelection, BboxRow, SketchParams};

use crate::error::FeatureResult;

/// Blocking user notification.
pub trait Alerts {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Hooks for the detection and removal feature.
pub trait DetectView: Alerts {
    /// The file picked by the user, if any.
    fn selected_file(&self) -> Option<ImageUpload>;

    /// Replace the bbox list with `rows`.
    fn show_bboxes(&self, rows: &[BboxRow]);

    /// Current value of every selector in the bbox list.
    fn action_selections(&self) -> Vec<ActionSelection>;

    /// Display the edited image.
    fn show_edited(&self, data_url: &str);
}

/// Hooks for the sketch feature.
pub trait SketchView: Alerts {
    /// Values of the guidance scale and step fields.
    fn sketch_params(&self) -> SketchParams;

    /// Display the generated image.
    fn show_generated(&self, data_url: &str);
}

/// Hooks for the GAN feature.
pub trait GanView: Alerts {
    /// Raw text of the latent dimension field.
    fn latent_dim(&self) -> String;

    /// Raw text of the noise scale field.
    fn noise_scale(&self) -> String;

    /// Display the generated image.
    fn show_generated(&self, data_url: &str);
}

/// Turn a controller result into an alert on failure.
///
/// Cancelled requests were superseded by a newer one and stay silent.
#[must_use]
pub fn present<T>(alerts: &impl Alerts, result: FeatureResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_cancelled() => {
            tracing::debug!("Dropping superseded request: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("{e}");
            alerts.alert(&e.user_message());
            None
        }
    }
}
