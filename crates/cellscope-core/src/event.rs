//! Pointer input delivered to chart surfaces.
//!
//! Positions are in surface pixels, with the origin at the surface's top-left
//! corner.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pointer event types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Button pressed
    MouseDown {
        /// Position of press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Wheel scrolled over position
    Scroll {
        /// Pointer position when the wheel turned
        position: Point,
        /// Vertical delta in pixels; positive scrolls down (zooms out)
        delta_y: f32,
    },
    /// Pointer left the surface
    MouseLeave,
}

impl Event {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::Scroll { position, .. } => Some(*position),
            Self::MouseLeave => None,
        }
    }

    /// The same event with its position shifted into a child's coordinates.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        match self {
            Self::MouseMove { position } => Self::MouseMove {
                position: position.offset(dx, dy),
            },
            Self::MouseDown { position, button } => Self::MouseDown {
                position: position.offset(dx, dy),
                button,
            },
            Self::MouseUp { position, button } => Self::MouseUp {
                position: position.offset(dx, dy),
                button,
            },
            Self::Scroll { position, delta_y } => Self::Scroll {
                position: position.offset(dx, dy),
                delta_y,
            },
            Self::MouseLeave => Self::MouseLeave,
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left button
    #[default]
    Left,
    /// Right button
    Right,
    /// Middle button
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub const fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
