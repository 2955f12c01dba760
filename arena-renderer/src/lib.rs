//! # Vision Arena Renderer
//!
//! Everything that touches pixels: base64 and PNG codecs, the drawing
//! surfaces results are rendered onto, and the freehand sketch pad.
//!
//! ```text
//! ┌──────────────┐   decode    ┌──────────────┐
//! │ ImagePayload │ ──────────▶ │  RgbaImage   │
//! └──────────────┘             └──────┬───────┘
//!        ▲                            │ resize + blit at (0, 0)
//!        │ encode PNG                 ▼
//! ┌──────┴───────┐             ┌──────────────┐
//! │  SketchPad   │             │ SharedSurface│
//! └──────────────┘             └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod error;
pub mod sketch;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use sketch::{SketchPad, BRUSH_RADIUS, SKETCH_HEIGHT, SKETCH_WIDTH};
pub use surface::{draw_payload, SharedSurface, Surface};
