//! Input event types for pointers and keyboard

use std::time::Duration;

use glissade_core::ElementId;
use serde::{Deserialize, Serialize};

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer was pressed on the slider viewport
    PointerDown(Pointer),
    /// A pressed pointer moved
    PointerMove(Pointer),
    /// A pressed pointer was released
    PointerUp(Pointer),
    /// The platform cancelled the gesture (e.g. the browser took over scrolling)
    PointerCancel(Pointer),
    /// Native click on the viewport, delivered after pointer up
    Click {
        /// Element that received the click
        target: Option<ElementId>,
    },
    /// Key pressed while the slider has focus
    Key(KeyboardEvent),
}

// ============================================================================
// Pointer Events
// ============================================================================

/// Kind of device that produced a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Pointer buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, a touch contact, or pen tip
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Right mouse button
    Secondary,
    /// Other button with index
    Other(u16),
}

/// A single pointer sample
#[derive(Clone, Debug, PartialEq)]
pub struct Pointer {
    /// Pointer identifier (touch identifier or pointerId)
    pub id: u64,
    /// Device kind
    pub kind: PointerKind,
    /// Button that changed state (for down/up) or is held
    pub button: PointerButton,
    /// X position in page coordinates
    pub x: f32,
    /// Y position in page coordinates
    pub y: f32,
    /// Host monotonic timestamp
    pub timestamp: Duration,
    /// Hit-tested element under the pointer
    pub target: Option<ElementId>,
}

impl Pointer {
    /// Create a primary mouse pointer sample at a position
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            id: 1,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            x,
            y,
            timestamp: Duration::ZERO,
            target: None,
        }
    }

    /// Create a touch sample for the given touch identifier
    pub fn touch(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: PointerKind::Touch,
            ..Self::mouse(x, y)
        }
    }

    /// Set the sample timestamp
    pub fn at(mut self, timestamp: Duration) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the button
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the hit-tested element
    pub fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Check if this sample may start a press
    ///
    /// Mouse presses only start with the primary or middle button.
    pub fn can_press(&self) -> bool {
        match self.kind {
            PointerKind::Mouse => {
                matches!(self.button, PointerButton::Primary | PointerButton::Middle)
            }
            PointerKind::Touch | PointerKind::Pen => true,
        }
    }
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed
    pub key: Key,
}

/// Key codes relevant to slider navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    /// Any other key, by platform key code
    Other(u32),
}

impl From<Key> for KeyboardEvent {
    fn from(key: Key) -> Self {
        Self { key }
    }
}
