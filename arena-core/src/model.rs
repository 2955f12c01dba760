//! Request and response shapes exchanged with the feature backends.
//!
//! Every image crosses the wire as bare base64 text. The format is never
//! embedded; PNG is asserted when a data URL is built for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{ArenaError, ArenaResult};

/// MIME type asserted for every image payload.
pub const PNG_MIME: &str = "image/png";

/// Where feature calls are answered.
///
/// Decided once by the capability probe and injected into the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// A real backend answered the probe.
    Remote,
    /// No backend; responses are synthesized in-process.
    #[default]
    Simulated,
}

impl BackendMode {
    /// Check if calls go over the network.
    #[must_use]
    pub fn is_remote(self) -> bool {
        self == Self::Remote
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// Base64-encoded raster without a data-URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wrap already-encoded base64 text.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The base64 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the base64 text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the payload carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a `data:image/png;base64,...` URL for an image display.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{PNG_MIME};base64,{}", self.0)
    }
}

/// Four numbers locating a detected object.
///
/// The backend decides the convention (`[x1, y1, x2, y2]` today). The client
/// never reinterprets the values and sends them back exactly as received,
/// integer or float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingBox(pub [Number; 4]);

impl BoundingBox {
    /// Build a box from integer pixel coordinates.
    #[must_use]
    pub fn from_pixels(coords: [i64; 4]) -> Self {
        Self(coords.map(Number::from))
    }

    /// Coordinates as floats, for drawing or logging.
    #[must_use]
    pub fn to_f64(&self) -> [f64; 4] {
        [0, 1, 2, 3].map(|i| self.0[i].as_f64().unwrap_or(0.0))
    }
}

/// A single detected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label.
    pub label: String,
    /// Confidence score.
    pub score: f64,
    /// Location in the annotated image.
    pub bbox: BoundingBox,
}

/// Response of the detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detections in backend order. Selector indices refer to this order.
    pub bboxes: Vec<Detection>,
    /// Image with boxes drawn by the backend.
    pub annotated_image: ImagePayload,
}

/// What to do with a detected object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Leave the object in place.
    #[default]
    Keep,
    /// Remove (inpaint or blur) the object.
    Remove,
}

impl Action {
    /// The wire and selector value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Remove => "remove",
        }
    }
}

impl FromStr for Action {
    type Err = ArenaError;

    fn from_str(s: &str) -> ArenaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "remove" => Ok(Self::Remove),
            other => Err(ArenaError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an edit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditAction {
    /// Box copied from the detection.
    pub bbox: BoundingBox,
    /// Selected action.
    pub action: Action,
}

/// Body of the object edit call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    /// Image to edit (the annotated image returned by detection).
    pub image: ImagePayload,
    /// One action per detection, in detection order.
    pub actions: Vec<EditAction>,
}

/// Response of the object edit call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditResponse {
    /// Edited image.
    pub edited_image: ImagePayload,
}

/// Response of both generation calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Generated image.
    pub generated_image: ImagePayload,
}

/// Body of the GAN generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GanRequest {
    /// Size of the latent vector.
    pub latent_dim: i64,
    /// Scale applied to the sampled noise.
    pub noise_scale: f64,
}

impl Default for GanRequest {
    fn default() -> Self {
        Self {
            latent_dim: 16,
            noise_scale: 1.0,
        }
    }
}

/// Text form fields sent alongside a sketch.
///
/// Kept as text because they are forwarded verbatim from the UI inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchParams {
    /// Classifier-free guidance scale.
    pub guidance_scale: String,
    /// Number of diffusion steps.
    pub num_steps: String,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            guidance_scale: "3.0".to_string(),
            num_steps: "15".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_mode_defaults_to_simulated() {
        assert_eq!(BackendMode::default(), BackendMode::Simulated);
        assert!(!BackendMode::default().is_remote());
        assert!(BackendMode::Remote.is_remote());
        assert_eq!(BackendMode::Remote.to_string(), "remote");
    }

    #[test]
    fn test_data_url_asserts_png() {
        let payload = ImagePayload::new("iVBORw0KGgo=");
        assert_eq!(payload.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_detection_result_from_backend_json() {
        let value = json!({
            "bboxes": [
                {"bbox": [10, 20, 110, 220], "label": "dog", "score": 0.912},
                {"bbox": [0, 0, 5, 5], "label": "cat", "score": 0.5}
            ],
            "annotated_image": "AAAA"
        });

        let result: DetectionResult = serde_json::from_value(value).expect("should parse");
        assert_eq!(result.bboxes.len(), 2);
        assert_eq!(result.bboxes[0].label, "dog");
        assert_eq!(result.bboxes[0].bbox.to_f64(), [10.0, 20.0, 110.0, 220.0]);
        assert_eq!(result.annotated_image.as_str(), "AAAA");
    }

    #[test]
    fn test_bbox_integers_survive_round_trip() {
        let bbox: BoundingBox = serde_json::from_value(json!([1, 2, 3, 4])).expect("bbox");
        let action = EditAction {
            bbox,
            action: Action::Remove,
        };
        let json = serde_json::to_value(&action).expect("should serialize");
        assert_eq!(json, json!({"bbox": [1, 2, 3, 4], "action": "remove"}));
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("keep".parse::<Action>().expect("keep"), Action::Keep);
        assert_eq!(" Remove ".parse::<Action>().expect("remove"), Action::Remove);
        assert!(matches!(
            "blur".parse::<Action>(),
            Err(ArenaError::InvalidAction(_))
        ));
        assert_eq!(Action::default(), Action::Keep);
    }

    #[test]
    fn test_gan_request_wire_shape() {
        let request = GanRequest {
            latent_dim: 64,
            noise_scale: 0.5,
        };
        let json = serde_json::to_value(request).expect("should serialize");
        assert_eq!(json, json!({"latent_dim": 64, "noise_scale": 0.5}));
    }
}
