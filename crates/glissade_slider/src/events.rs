//! Slider notifications

use glissade_core::{ElementId, Event};
use glissade_platform::Pointer;

/// Events emitted by a slider
#[derive(Clone, Debug, PartialEq)]
pub enum SliderEvent {
    Activate,
    Deactivate,
    /// A cell became selected (or was re-selected by force)
    Select { index: usize },
    /// Motion came to rest
    Settle { index: usize },
    PointerDown { pointer: Pointer },
    PointerUp { pointer: Pointer },
    DragStart { pointer: Pointer },
    DragMove {
        pointer: Pointer,
        /// Offset from the press point
        delta_x: f32,
        delta_y: f32,
    },
    DragEnd { pointer: Pointer },
    /// Press and release without a drag
    StaticClick {
        pointer: Pointer,
        /// Clicked cell element
        cell: Option<ElementId>,
        /// Index of the clicked cell
        index: Option<usize>,
    },
    /// Cells were inserted or removed
    CellAddedRemoved {
        /// First index whose layout changed
        index: usize,
        /// Amount the selected index was shifted by
        selected_shift: isize,
    },
    /// User navigated with keyboard, buttons, or page dots
    UiChange,
    /// Last event before listeners are detached
    Destroy,
}

/// Subscription key for [`SliderEvent`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliderEventKind {
    Activate,
    Deactivate,
    Select,
    Settle,
    PointerDown,
    PointerUp,
    DragStart,
    DragMove,
    DragEnd,
    StaticClick,
    CellAddedRemoved,
    UiChange,
    Destroy,
}

impl Event for SliderEvent {
    type Kind = SliderEventKind;

    fn kind(&self) -> SliderEventKind {
        match self {
            SliderEvent::Activate => SliderEventKind::Activate,
            SliderEvent::Deactivate => SliderEventKind::Deactivate,
            SliderEvent::Select { .. } => SliderEventKind::Select,
            SliderEvent::Settle { .. } => SliderEventKind::Settle,
            SliderEvent::PointerDown { .. } => SliderEventKind::PointerDown,
            SliderEvent::PointerUp { .. } => SliderEventKind::PointerUp,
            SliderEvent::DragStart { .. } => SliderEventKind::DragStart,
            SliderEvent::DragMove { .. } => SliderEventKind::DragMove,
            SliderEvent::DragEnd { .. } => SliderEventKind::DragEnd,
            SliderEvent::StaticClick { .. } => SliderEventKind::StaticClick,
            SliderEvent::CellAddedRemoved { .. } => SliderEventKind::CellAddedRemoved,
            SliderEvent::UiChange => SliderEventKind::UiChange,
            SliderEvent::Destroy => SliderEventKind::Destroy,
        }
    }
}

impl SliderEventKind {
    /// Event name as used by host pages
    pub fn name(self) -> &'static str {
        match self {
            SliderEventKind::Activate => "activate",
            SliderEventKind::Deactivate => "deactivate",
            SliderEventKind::Select => "select",
            SliderEventKind::Settle => "settle",
            SliderEventKind::PointerDown => "pointerDown",
            SliderEventKind::PointerUp => "pointerUp",
            SliderEventKind::DragStart => "dragStart",
            SliderEventKind::DragMove => "dragMove",
            SliderEventKind::DragEnd => "dragEnd",
            SliderEventKind::StaticClick => "staticClick",
            SliderEventKind::CellAddedRemoved => "cellAddedRemoved",
            SliderEventKind::UiChange => "uiChange",
            SliderEventKind::Destroy => "destroy",
        }
    }

    /// Every kind, in declaration order
    pub const ALL: [SliderEventKind; 13] = [
        SliderEventKind::Activate,
        SliderEventKind::Deactivate,
        SliderEventKind::Select,
        SliderEventKind::Settle,
        SliderEventKind::PointerDown,
        SliderEventKind::PointerUp,
        SliderEventKind::DragStart,
        SliderEventKind::DragMove,
        SliderEventKind::DragEnd,
        SliderEventKind::StaticClick,
        SliderEventKind::CellAddedRemoved,
        SliderEventKind::UiChange,
        SliderEventKind::Destroy,
    ];
}

impl std::fmt::Display for SliderEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
