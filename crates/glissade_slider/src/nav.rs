//! Navigation companions
//!
//! A nav slider mirrors the selection of a companion slider and highlights
//! the mirrored cell; a static click on a nav cell selects that cell in the
//! companion. Sliders never hold each other, so a [`NavLink`] records what
//! each side emitted and [`NavLink::sync`] applies it once the host has
//! finished dispatching.
//!
//! ```text
//! companion ──select──▶ NavLink ──sync──▶ nav.nav_companion_select()
//! nav ──staticClick──▶ NavLink ──sync──▶ companion.select()
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glissade_core::{ElementId, ListenerId};
use tracing::{debug, trace};

use crate::events::{SliderEvent, SliderEventKind};
use crate::slider::{SelectOptions, Slider};

/// Coupling between a nav slider and the slider it navigates
#[derive(Debug)]
pub struct NavLink {
    companion_selected: Rc<RefCell<Option<usize>>>,
    nav_clicked: Rc<RefCell<Option<usize>>>,
    companion_listener: ListenerId,
    nav_listener: ListenerId,
}

impl NavLink {
    /// Make `nav` follow `companion`, starting from its current selection
    pub fn attach(nav: &mut Slider, companion: &mut Slider) -> Self {
        let companion_selected = Rc::new(RefCell::new(None));
        let nav_clicked = Rc::new(RefCell::new(None));

        let sink = companion_selected.clone();
        let companion_listener = companion.on(SliderEventKind::Select, move |event| {
            if let SliderEvent::Select { index } = event {
                *sink.borrow_mut() = Some(*index);
            }
        });
        let sink = nav_clicked.clone();
        let nav_listener = nav.on(SliderEventKind::StaticClick, move |event| {
            if let SliderEvent::StaticClick {
                index: Some(index), ..
            } = event
            {
                *sink.borrow_mut() = Some(*index);
            }
        });

        if let Some(index) = companion.selected_index() {
            nav.nav_companion_select(index);
        }
        debug!("Nav link attached");

        Self {
            companion_selected,
            nav_clicked,
            companion_listener,
            nav_listener,
        }
    }

    /// Apply the clicks and selections recorded since the last sync
    ///
    /// Returns true if either slider changed selection.
    pub fn sync(&self, nav: &mut Slider, companion: &mut Slider) -> bool {
        let mut changed = false;
        let clicked = self.nav_clicked.borrow_mut().take();
        if let Some(index) = clicked {
            trace!("Nav click on {}, selecting companion", index);
            changed |= companion.select(index as isize, SelectOptions::default());
        }
        // A companion select triggered above lands here in the same pass
        let selected = self.companion_selected.borrow_mut().take();
        if let Some(index) = selected {
            changed |= nav.nav_companion_select(index);
        }
        changed
    }

    /// Stop following and clear the nav highlight
    pub fn detach(self, nav: &mut Slider, companion: &mut Slider) {
        companion.off(self.companion_listener);
        nav.off(self.nav_listener);
        nav.nav_selected = None;
        debug!("Nav link detached");
    }
}

impl Slider {
    /// Select `index` to mirror a companion and highlight it
    ///
    /// The highlight is dropped when this slider has no such cell.
    pub fn nav_companion_select(&mut self, index: usize) -> bool {
        let changed = self.select(index as isize, SelectOptions::default());
        self.nav_selected = None;
        if self.selected_index() == Some(index) {
            self.nav_selected = self.selected_element();
        }
        changed
    }

    /// Cell highlighted as the companion's selection
    pub fn nav_selected_element(&self) -> Option<ElementId> {
        self.nav_selected
    }
}
