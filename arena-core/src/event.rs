//! Pointer input for drawing surfaces.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// A pointer event in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position relative to the viewport.
    pub client_x: f32,
    /// Y position relative to the viewport.
    pub client_y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub fn new(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            client_x,
            client_y,
        }
    }

    /// Position relative to the top-left corner of `rect`.
    #[must_use]
    pub fn local_position(&self, rect: &CanvasRect) -> (f32, f32) {
        (self.client_x - rect.left, self.client_y - rect.top)
    }
}

/// Bounding rectangle of a surface in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
}

impl CanvasRect {
    /// Create a rect at the given origin.
    #[must_use]
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}
