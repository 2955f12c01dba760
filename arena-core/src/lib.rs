//! # Vision Arena Core
//!
//! Shared types for the Vision Arena demo harness.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 arena-core                  │
//! ├──────────────────────┬──────────────────────┤
//! │  Wire Model          │  Input               │
//! │  - Backend mode      │  - Pointer events    │
//! │  - Detections        │  - Canvas rects      │
//! │  - Edit actions      │                      │
//! │  - Image payloads    │                      │
//! ├──────────────────────┴──────────────────────┤
//! │  Detection Session (detect → apply edits)   │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod model;
pub mod session;

pub use error::{ArenaError, ArenaResult};
pub use event::{CanvasRect, PointerEvent, PointerPhase};
pub use model::{
    Action, BackendMode, BoundingBox, Detection, DetectionResult, EditAction, EditRequest,
    EditResponse, GanRequest, GeneratedImage, ImagePayload, SketchParams, PNG_MIME,
};
pub use session::{ActionSelection, BboxRow, DetectionSession};

/// Arena core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
