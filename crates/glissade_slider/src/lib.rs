//! Glissade Slider
//!
//! A headless, draggable carousel. Cells are laid out along a horizontal
//! strip; one is selected and a frame-stepped physics integrator pulls the
//! strip toward it. Pointer drags move the strip directly and release into a
//! flick, optionally gliding freely or wrapping around endlessly.
//!
//! # Architecture
//!
//! ```text
//! host page
//!   │  HostEvent (pointer, key, resize, visibility, hover)
//!   ▼
//! Slider ──on/off──▶ listeners (select, settle, dragStart, ...)
//!   │  start_ticking / set_timeout
//!   ▼
//! FrameScheduler ──animate()/fire_timer()──▶ Slider
//!   │
//!   ▼
//! RenderState (strip offset, cell offsets, dots, buttons) ──▶ host page
//! ```
//!
//! # Example
//!
//! ```rust
//! use glissade_animation::ManualScheduler;
//! use glissade_core::ElementId;
//! use glissade_slider::prelude::*;
//!
//! let scheduler = ManualScheduler::new();
//! let mut slider = Slider::new(SliderOptions::default(), scheduler.handle()).unwrap();
//!
//! let cells = (0..4)
//!     .map(|i| Cell::new(ElementId(i), CellSize::new(200.0, 120.0).unwrap()))
//!     .collect();
//! slider.activate(400.0, cells);
//!
//! slider.select(3, SelectOptions::default());
//! scheduler.run_while_animating(&mut slider, 1_000);
//! assert_eq!(slider.selected_index(), Some(3));
//! ```

mod add_remove;
pub mod cell;
pub mod drag;
pub mod error;
pub mod events;
pub mod nav;
pub mod options;
pub mod page_dots;
pub mod player;
pub mod position;
pub mod prev_next;
pub mod render;
pub mod slider;

pub use cell::{Cell, CellSize};
pub use drag::DragPhase;
pub use error::{Result, SliderError};
pub use events::{SliderEvent, SliderEventKind};
pub use nav::NavLink;
pub use options::{AutoPlay, CellAlign, NamedAlign, SliderOptions, TouchVerticalScroll, WatchCss};
pub use page_dots::PageDots;
pub use player::{PauseReason, Player, PlayerState};
pub use position::PositionValue;
pub use prev_next::{Direction, PrevNextButton};
pub use render::{CellRender, OriginSide, RenderState};
pub use slider::{SelectOptions, Slider};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cell::{Cell, CellSize};
    pub use crate::events::{SliderEvent, SliderEventKind};
    pub use crate::options::{AutoPlay, CellAlign, SliderOptions};
    pub use crate::prev_next::Direction;
    pub use crate::slider::{SelectOptions, Slider};
}
