//! Glissade Platform Input
//!
//! Platform-agnostic description of everything a host page feeds into a
//! slider: pointer gestures, clicks, arrow keys, viewport resizes, page
//! visibility, and hover enter/leave.
//!
//! Hosts translate their native events (DOM events, winit events, touch
//! callbacks) into [`HostEvent`]s and act on the [`EventResponse`] the widget
//! returns (for example calling `preventDefault()` on the native event).
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use glissade_platform::prelude::*;
//!
//! let down = HostEvent::Input(InputEvent::PointerDown(
//!     Pointer::mouse(120.0, 40.0).at(Duration::from_millis(5)),
//! ));
//! assert!(matches!(down, HostEvent::Input(InputEvent::PointerDown(_))));
//! ```

mod event;
mod input;

pub use event::{EventResponse, HostEvent, Visibility};
pub use input::{InputEvent, Key, KeyboardEvent, Pointer, PointerButton, PointerKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::{EventResponse, HostEvent, Visibility};
    pub use crate::input::{
        InputEvent, Key, KeyboardEvent, Pointer, PointerButton, PointerKind,
    };
}
