//! Host events and the widget's response to them

use crate::input::InputEvent;

/// Events a host page delivers to a widget
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Input event (pointer, click, keyboard)
    Input(InputEvent),
    /// The widget's viewport changed size
    Resized {
        /// New inner width of the viewport in pixels
        width: f32,
    },
    /// Page visibility changed
    Visibility(Visibility),
    /// Mouse entered the widget
    PointerEntered,
    /// Mouse left the widget
    PointerLeft,
}

/// Page visibility state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// What the host should do with the native event it just delivered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Cancel the native default action (text selection, scrolling, click)
    pub prevent_default: bool,
}

impl EventResponse {
    /// Let the native event proceed
    pub const IGNORED: Self = Self {
        prevent_default: false,
    };

    /// Cancel the native default action
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
    };

    pub fn prevent_default_if(condition: bool) -> Self {
        Self {
            prevent_default: condition,
        }
    }
}
