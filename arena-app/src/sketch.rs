//! Sketch-to-image generation.

use std::sync::{Mutex, PoisonError};

use arena_client::{CancelSlot, SketchUpload, Transport};
use arena_core::{CanvasRect, GeneratedImage, ImagePayload, PointerEvent};
use arena_renderer::SketchPad;

use crate::error::{accept_reply, Feature, FeatureResult};
use crate::hooks::SketchView;

/// Controller for the sketch feature.
#[derive(Debug)]
pub struct SketchController {
    transport: Transport,
    pad: Mutex<SketchPad>,
    slot: CancelSlot,
}

impl SketchController {
    /// Create a controller with a blank pad.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            pad: Mutex::new(SketchPad::new()),
            slot: CancelSlot::new(),
        }
    }

    /// Forward a pointer event to the pad. Returns true if ink was laid.
    #[must_use]
    pub fn handle_pointer(&self, event: &PointerEvent, rect: &CanvasRect) -> bool {
        self.pad
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle_pointer(event, rect)
    }

    /// Wipe the pad to white.
    pub fn clear(&self) {
        self.pad.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Copy of the pad.
    #[must_use]
    pub fn pad(&self) -> SketchPad {
        self.pad.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Send the pad to the generator and show the result.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::FeatureError::Render`] if the pad cannot be
    /// encoded and [`crate::FeatureError::Rejected`] on a non-ok reply.
    pub async fn generate(&self, view: &impl SketchView) -> FeatureResult<ImagePayload> {
        let png = self
            .pad
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .to_png()?;
        let upload = SketchUpload::new(png, view.sketch_params());

        let outcome = self.slot.run(self.transport.sketch_to_image(&upload)).await;
        let generated: GeneratedImage = accept_reply(Feature::Sketch, outcome).await?;

        view.show_generated(&generated.generated_image.to_data_url());
        Ok(generated.generated_image)
    }
}
