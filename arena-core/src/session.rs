//! State carried from the detect phase to the apply-edits phase.

use serde::{Deserialize, Serialize};

use crate::{
    Action, ArenaError, ArenaResult, Detection, DetectionResult, EditAction, EditRequest,
    ImagePayload,
};

/// Current value of one per-box action selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSelection {
    /// Index into the stored detections.
    pub index: usize,
    /// Selected action.
    pub action: Action,
}

impl ActionSelection {
    /// Create a selection.
    #[must_use]
    pub fn new(index: usize, action: Action) -> Self {
        Self { index, action }
    }
}

/// A line of the editable bbox list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BboxRow {
    /// Index the selector reports back.
    pub index: usize,
    /// Text shown next to the selector, e.g. `#1 dog (0.91)`.
    pub caption: String,
    /// Initial selector value.
    pub action: Action,
}

/// Detections and the image they were computed on.
///
/// Replaced wholesale by every successful detect; never edited in place so
/// selector indices stay valid until the next detect.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSession {
    image: ImagePayload,
    detections: Vec<Detection>,
}

impl DetectionSession {
    /// Build a session from a detection response.
    #[must_use]
    pub fn new(result: DetectionResult) -> Self {
        Self {
            image: result.annotated_image,
            detections: result.bboxes,
        }
    }

    /// The annotated image sent back for editing.
    #[must_use]
    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    /// Detections in backend order.
    #[must_use]
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Check if nothing was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Rows for the bbox list, every selector defaulting to keep.
    #[must_use]
    pub fn rows(&self) -> Vec<BboxRow> {
        self.detections
            .iter()
            .enumerate()
            .map(|(index, detection)| BboxRow {
                index,
                caption: format!("#{} {} ({})", index + 1, detection.label, detection.score),
                action: Action::Keep,
            })
            .collect()
    }

    /// Build the edit request from the current selector values.
    ///
    /// Actions follow selector order, each carrying the box of the detection
    /// its index points at.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::StaleSelection`] if a selector index is out of
    /// range for the stored detections.
    pub fn edit_request(&self, selections: &[ActionSelection]) -> ArenaResult<EditRequest> {
        let actions = selections
            .iter()
            .map(|selection| {
                let detection =
                    self.detections
                        .get(selection.index)
                        .ok_or(ArenaError::StaleSelection {
                            index: selection.index,
                            len: self.detections.len(),
                        })?;
                Ok(EditAction {
                    bbox: detection.bbox.clone(),
                    action: selection.action,
                })
            })
            .collect::<ArenaResult<Vec<_>>>()?;

        tracing::debug!(
            "Built edit request with {} actions ({} remove)",
            actions.len(),
            actions.iter().filter(|a| a.action == Action::Remove).count()
        );

        Ok(EditRequest {
            image: self.image.clone(),
            actions,
        })
    }
}
