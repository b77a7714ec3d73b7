//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` consumed
//! by the drawing surface. Coordinates are canvas-local; the bridge has
//! already subtracted the canvas offset.

/// Which kind of device produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    /// Touch input scrolls or zooms the page unless the default is suppressed.
    Touch,
    Pen,
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64, kind: PointerKind },

    /// Pointer moved (mouse move, touch move, pen move).
    PointerMove { x: f64, y: f64, kind: PointerKind },

    /// Pointer released.
    PointerUp { kind: PointerKind },

    /// Pointer left the canvas element.
    PointerLeave { kind: PointerKind },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, kind: PointerKind) -> Self {
        Self::PointerDown { x, y, kind }
    }

    pub fn from_pointer_move(x: f64, y: f64, kind: PointerKind) -> Self {
        Self::PointerMove { x, y, kind }
    }

    pub fn from_pointer_up(kind: PointerKind) -> Self {
        Self::PointerUp { kind }
    }

    pub fn from_pointer_leave(kind: PointerKind) -> Self {
        Self::PointerLeave { kind }
    }

    pub fn kind(&self) -> PointerKind {
        match self {
            Self::PointerDown { kind, .. }
            | Self::PointerMove { kind, .. }
            | Self::PointerUp { kind }
            | Self::PointerLeave { kind } => *kind,
        }
    }
}

impl PointerKind {
    /// Map a DOM `PointerEvent.pointerType` string. Unknown types are mice.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }
}
