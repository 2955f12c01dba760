//! Terminal implementation of the UI hooks.
//!
//! Inputs come from command-line arguments; the bbox list is printed to
//! stdout, alerts go to stderr, and the last displayed image is kept so the
//! host can write it to disk.

use std::sync::{Mutex, PoisonError};

use arena_client::ImageUpload;
use arena_core::{
    Action, ActionSelection, BboxRow, CanvasRect, PointerEvent, PointerPhase, SketchParams,
};
use serde::Deserialize;

use crate::hooks::{Alerts, DetectView, GanView, SketchView};

/// A stroke as a list of `[x, y]` pad coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Stroke(pub Vec<[f32; 2]>);

impl Stroke {
    /// Pointer events that draw this stroke: down, one move per point, up.
    #[must_use]
    pub fn pointer_events(&self) -> Vec<PointerEvent> {
        let Some(&[x, y]) = self.0.first() else {
            return Vec::new();
        };
        let mut events = Vec::with_capacity(self.0.len() + 2);
        events.push(PointerEvent::new(PointerPhase::Down, x, y));
        events.extend(
            self.0
                .iter()
                .map(|&[x, y]| PointerEvent::new(PointerPhase::Move, x, y)),
        );
        if let Some(&[x, y]) = self.0.last() {
            events.push(PointerEvent::new(PointerPhase::Up, x, y));
        }
        events
    }
}

/// Parse a strokes file.
///
/// # Errors
///
/// Returns an error if `json` is not an array of point arrays.
pub fn parse_strokes(json: &str) -> serde_json::Result<Vec<Stroke>> {
    serde_json::from_str(json)
}

/// Sketch pad origin on the terminal "page". Strokes are given in pad
/// coordinates, so the pad sits at the origin.
pub const PAD_RECT: CanvasRect = CanvasRect {
    left: 0.0,
    top: 0.0,
};

/// UI hooks backed by the terminal.
#[derive(Debug, Default)]
pub struct ConsoleView {
    upload: Option<ImageUpload>,
    remove: Vec<usize>,
    sketch_params: SketchParams,
    latent_dim: String,
    noise_scale: String,
    rows: Mutex<Vec<BboxRow>>,
    alerts: Mutex<Vec<String>>,
    displayed: Mutex<Option<String>>,
}

impl ConsoleView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chosen file.
    #[must_use]
    pub fn with_upload(mut self, upload: ImageUpload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Detections to mark for removal, numbered from 1 as listed.
    #[must_use]
    pub fn with_removals(mut self, numbers: Vec<usize>) -> Self {
        self.remove = numbers;
        self
    }

    /// Set the sketch fields.
    #[must_use]
    pub fn with_sketch_params(mut self, params: SketchParams) -> Self {
        self.sketch_params = params;
        self
    }

    /// Set the GAN fields.
    #[must_use]
    pub fn with_gan_fields(
        mut self,
        latent_dim: impl Into<String>,
        noise_scale: impl Into<String>,
    ) -> Self {
        self.latent_dim = latent_dim.into();
        self.noise_scale = noise_scale.into();
        self
    }

    /// Rows printed by the last detect.
    #[must_use]
    pub fn rows(&self) -> Vec<BboxRow> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Every alert raised so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Take the data URL of the last displayed image.
    #[must_use]
    pub fn take_displayed(&self) -> Option<String> {
        self.displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn display(&self, data_url: &str) {
        *self.displayed.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(data_url.to_string());
    }
}

impl Alerts for ConsoleView {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

impl DetectView for ConsoleView {
    fn selected_file(&self) -> Option<ImageUpload> {
        self.upload.clone()
    }

    fn show_bboxes(&self, rows: &[BboxRow]) {
        if rows.is_empty() {
            println!("No objects detected.");
        }
        for row in rows {
            println!("{}  [{}]", row.caption, row.action);
        }
        *self.rows.lock().unwrap_or_else(PoisonError::into_inner) = rows.to_vec();
    }

    fn action_selections(&self) -> Vec<ActionSelection> {
        self.rows()
            .iter()
            .map(|row| {
                let action = if self.remove.contains(&(row.index + 1)) {
                    Action::Remove
                } else {
                    row.action
                };
                ActionSelection::new(row.index, action)
            })
            .collect()
    }

    fn show_edited(&self, data_url: &str) {
        self.display(data_url);
    }
}

impl SketchView for ConsoleView {
    fn sketch_params(&self) -> SketchParams {
        self.sketch_params.clone()
    }

    fn show_generated(&self, data_url: &str) {
        self.display(data_url);
    }
}

impl GanView for ConsoleView {
    fn latent_dim(&self) -> String {
        self.latent_dim.clone()
    }

    fn noise_scale(&self) -> String {
        self.noise_scale.clone()
    }

    fn show_generated(&self, data_url: &str) {
        self.display(data_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize) -> BboxRow {
        BboxRow {
            index,
            caption: format!("#{} thing (0.5)", index + 1),
            action: Action::Keep,
        }
    }

    #[test]
    fn test_removals_are_one_based() {
        let view = ConsoleView::new().with_removals(vec![2]);
        view.show_bboxes(&[row(0), row(1), row(2)]);

        let actions: Vec<Action> = view
            .action_selections()
            .into_iter()
            .map(|s| s.action)
            .collect();
        assert_eq!(actions, vec![Action::Keep, Action::Remove, Action::Keep]);
    }

    #[test]
    fn test_parse_strokes() {
        let strokes = parse_strokes("[[[10, 10], [12.5, 11]], []]").expect("strokes");
        assert_eq!(strokes.len(), 2);

        let events = strokes[0].pointer_events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].phase, PointerPhase::Down);
        assert!((events[2].client_x - 12.5).abs() < f32::EPSILON);
        assert_eq!(events[3].phase, PointerPhase::Up);

        assert!(strokes[1].pointer_events().is_empty());
        assert!(parse_strokes("{\"x\": 1}").is_err());
    }

    #[test]
    fn test_display_is_taken_once() {
        let view = ConsoleView::new();
        GanView::show_generated(&view, "data:image/png;base64,AA==");
        assert_eq!(
            view.take_displayed().as_deref(),
            Some("data:image/png;base64,AA==")
        );
        assert!(view.take_displayed().is_none());
    }
}
