//! Input abstraction layer.
//!
//! Normalizes mouse and pointer events into a unified `InputEvent` enum in
//! surface-local coordinates.

use sketch_core::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed over the surface.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved over the surface, pressed or not.
    PointerMove { x: f64, y: f64 },
    /// Pointer released.
    PointerUp,
    /// Pointer left the surface.
    PointerLeave,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } => Some(Point::new(*x, *y)),
            Self::PointerUp | Self::PointerLeave => None,
        }
    }
}
