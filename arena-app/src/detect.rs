//! Object detection and removal.
//!
//! Two phases. [`DetectController::detect`] uploads the chosen image, keeps
//! the detections and draws the annotated image on the canvas.
//! [`DetectController::apply_edits`] sends the keep/remove choices back with
//! the annotated image and shows the edited result.

use std::sync::{PoisonError, RwLock};

use arena_client::{CancelSlot, Transport};
use arena_core::{DetectionResult, DetectionSession, EditResponse, ImagePayload};
use arena_renderer::{draw_payload, SharedSurface};

use crate::error::{accept_reply, Feature, FeatureError, FeatureResult};
use crate::hooks::DetectView;

/// Controller for the detection and removal feature.
#[derive(Debug)]
pub struct DetectController {
    transport: Transport,
    canvas: SharedSurface,
    session: RwLock<Option<DetectionSession>>,
    detect_slot: CancelSlot,
    edit_slot: CancelSlot,
}

impl DetectController {
    /// Create a controller with an empty canvas and no detections.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            canvas: SharedSurface::default(),
            session: RwLock::new(None),
            detect_slot: CancelSlot::new(),
            edit_slot: CancelSlot::new(),
        }
    }

    /// Surface the annotated image is drawn on.
    #[must_use]
    pub fn canvas(&self) -> &SharedSurface {
        &self.canvas
    }

    /// Detections from the last successful detect.
    #[must_use]
    pub fn session(&self) -> Option<DetectionSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run detection on the selected file.
    ///
    /// Returns the canvas dimensions after drawing the annotated image.
    ///
    /// # Errors
    ///
    /// Fails with [`FeatureError::NoImageSelected`] before any request if no
    /// file is chosen, [`FeatureError::Rejected`] on a non-ok reply, and
    /// [`FeatureError::Render`] if the annotated image cannot be drawn. On
    /// any failure the previous detections stay in place.
    pub async fn detect(&self, view: &impl DetectView) -> FeatureResult<(u32, u32)> {
        let upload = view.selected_file().ok_or(FeatureError::NoImageSelected)?;
        tracing::debug!(file = %upload.file_name, bytes = upload.bytes.len(), "Detecting objects");

        let outcome = self
            .detect_slot
            .run(self.transport.detect_objects(&upload))
            .await;
        let result: DetectionResult = accept_reply(Feature::Detect, outcome).await?;

        // Keep the previous session and list if the image cannot be shown
        let dimensions = draw_payload(&self.canvas, &result.annotated_image).await?;

        let session = DetectionSession::new(result);
        let rows = session.rows();
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        view.show_bboxes(&rows);

        tracing::info!(
            detections = rows.len(),
            width = dimensions.0,
            height = dimensions.1,
            "Detection complete"
        );
        Ok(dimensions)
    }

    /// Send the current selector values to the edit backend.
    ///
    /// # Errors
    ///
    /// Fails with [`FeatureError::NoDetections`] before any request if there
    /// is nothing to edit, [`FeatureError::StaleSelection`] if a selector
    /// points past the stored detections, and [`FeatureError::Rejected`] on a
    /// non-ok reply.
    pub async fn apply_edits(&self, view: &impl DetectView) -> FeatureResult<ImagePayload> {
        let session = self
            .session()
            .filter(|session| !session.is_empty())
            .ok_or(FeatureError::NoDetections)?;

        let request = session.edit_request(&view.action_selections())?;

        let outcome = self
            .edit_slot
            .run(self.transport.object_edit(&request))
            .await;
        let response: EditResponse = accept_reply(Feature::Edit, outcome).await?;

        view.show_edited(&response.edited_image.to_data_url());
        Ok(response.edited_image)
    }
}
