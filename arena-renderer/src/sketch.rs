//! Freehand sketch pad.

use arena_core::{CanvasRect, PointerEvent, PointerPhase};

use crate::error::RenderResult;
use crate::surface::Surface;

/// Sketch pad width in pixels.
pub const SKETCH_WIDTH: u32 = 400;
/// Sketch pad height in pixels.
pub const SKETCH_HEIGHT: u32 = 300;
/// Radius of the disc stamped on every move.
pub const BRUSH_RADIUS: f32 = 3.0;

const PAPER: [u8; 4] = [255, 255, 255, 255];
const INK: [u8; 4] = [0, 0, 0, 255];

/// A fixed-size white pad that records strokes as stamped discs.
///
/// No undo history; [`SketchPad::clear`] is the only way back.
#[derive(Debug, Clone)]
pub struct SketchPad {
    surface: Surface,
    drawing: bool,
}

impl SketchPad {
    /// Create a blank 400x300 pad.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Surface::filled(SKETCH_WIDTH, SKETCH_HEIGHT, PAPER),
            drawing: false,
        }
    }

    /// Check if a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Current pad contents.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Feed a pointer event. `rect` is the pad's on-screen origin.
    ///
    /// Returns true if the event left ink on the pad.
    pub fn handle_pointer(&mut self, event: &PointerEvent, rect: &CanvasRect) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.drawing = true;
                false
            }
            PointerPhase::Up | PointerPhase::Leave => {
                self.drawing = false;
                false
            }
            PointerPhase::Move => {
                if !self.drawing {
                    return false;
                }
                let (x, y) = event.local_position(rect);
                self.stamp(x, y);
                true
            }
        }
    }

    /// Stamp a filled ink disc centred on `(x, y)` in pad coordinates.
    ///
    /// Parts of the disc outside the pad are clipped.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap
    )]
    pub fn stamp(&mut self, x: f32, y: f32) {
        let pixels = self.surface.pixels_mut();
        let (width, height) = pixels.dimensions();
        let r2 = BRUSH_RADIUS * BRUSH_RADIUS;

        let x0 = (x - BRUSH_RADIUS).floor().max(0.0) as i64;
        let y0 = (y - BRUSH_RADIUS).floor().max(0.0) as i64;
        let x1 = ((x + BRUSH_RADIUS).ceil() as i64).min(i64::from(width) - 1);
        let y1 = ((y + BRUSH_RADIUS).ceil() as i64).min(i64::from(height) - 1);

        for py in y0..=y1 {
            for px in x0..=x1 {
                // Sample at the pixel centre
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                if dx * dx + dy * dy <= r2 {
                    pixels.put_pixel(px as u32, py as u32, image::Rgba(INK));
                }
            }
        }
    }

    /// Reset the pad to solid white.
    pub fn clear(&mut self) {
        self.surface.fill(PAPER);
    }

    /// Encode the pad as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        self.surface.to_png()
    }
}

impl Default for SketchPad {
    fn default() -> Self {
        Self::new()
    }
}
