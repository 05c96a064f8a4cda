//! Structural changes: inserting and removing cells, size changes, resize

use glissade_core::ElementId;
use tracing::debug;

use crate::cell::{Cell, CellSize};
use crate::error::Result;
use crate::events::SliderEvent;
use crate::position::modulo;
use crate::slider::{SelectOptions, Slider};

impl Slider {
    /// Insert cells before index `at` (clamped to the cell count)
    ///
    /// Inserting at or before the selection keeps the same cell selected.
    pub fn insert(&mut self, cells: Vec<Cell>, at: usize) {
        if !self.is_active() || cells.is_empty() {
            return;
        }
        let had_cells = !self.cells.is_empty();
        let at = at.min(self.cells.len());
        let count = cells.len();
        self.cells.splice(at..at, cells);

        let shift = if had_cells && at <= self.selected_index {
            count as isize
        } else {
            0
        };
        debug!("Slider inserted {} cells at {}", count, at);
        self.cell_added_removed(at, shift);
    }

    pub fn append(&mut self, cells: Vec<Cell>) {
        let at = self.cells.len();
        self.insert(cells, at);
    }

    pub fn prepend(&mut self, cells: Vec<Cell>) {
        self.insert(cells, 0);
    }

    /// Remove the cells holding any of `elements`
    ///
    /// Returns the number of cells removed.
    pub fn remove(&mut self, elements: &[ElementId]) -> usize {
        if !self.is_active() {
            return 0;
        }
        let selected = self.selected_index;
        let mut shift = 0isize;
        let mut removed = 0;
        let mut index = 0;
        self.cells.retain(|cell| {
            let keep = !elements.contains(&cell.element());
            if !keep {
                removed += 1;
                if index < selected {
                    shift -= 1;
                }
            }
            index += 1;
            keep
        });

        if removed > 0 {
            debug!("Slider removed {} cells", removed);
            self.cell_added_removed(0, shift);
        }
        removed
    }

    /// Re-layout after a cell's measured size changed
    ///
    /// Returns false if no cell holds `element`.
    pub fn cell_size_changed(&mut self, element: ElementId, size: CellSize) -> Result<bool> {
        size.validate()?;
        let Some(index) = self.cell_index(element) else {
            return Ok(false);
        };
        self.cells[index].set_size(size);
        self.cell_change(index);
        Ok(true)
    }

    /// Replace every cell, keeping the selected index where possible
    pub fn reload(&mut self, cells: Vec<Cell>) {
        if !self.is_active() {
            return;
        }
        self.cells = cells;
        self.clamp_selected_index();
        self.cell_change(0);
    }

    /// Re-layout for a new viewport width
    ///
    /// Deferred until release while a drag is in progress.
    pub fn resize(&mut self, viewport_width: f32) {
        if !self.is_active() {
            return;
        }
        if self.drag.is_dragging() {
            debug!("Slider resize to {}px deferred until drag ends", viewport_width);
            self.deferred_resize = Some(viewport_width);
            return;
        }

        self.layout.viewport_width = viewport_width.max(0.0);
        if self.options.wrap_around && self.slideable_width > 0.0 {
            let x = modulo(self.integrator.x(), self.slideable_width);
            self.integrator.set_x(x);
        }
        self.position_cells(0);
        self.update_wrap_cells();
        self.position_slider_at_selected();
        debug!("Slider resized to {}px", self.layout.viewport_width);
    }

    fn clamp_selected_index(&mut self) {
        let last = self.cells.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
    }

    fn cell_added_removed(&mut self, index: usize, shift: isize) {
        let last = self.cells.len().saturating_sub(1) as isize;
        self.selected_index = (self.selected_index as isize + shift).clamp(0, last) as usize;
        self.emit(SliderEvent::CellAddedRemoved {
            index,
            selected_shift: shift,
        });
        self.cell_change(index);
    }

    /// Re-layout from `from` onwards and re-apply the selection
    fn cell_change(&mut self, from: usize) {
        self.position_cells(from);
        self.update_wrap_cells();

        if self.cells.is_empty() {
            self.stop_animation();
            self.sync_selected_element();
            self.position_slider();
        } else if self.options.free_scroll {
            self.position_slider();
            self.sync_selected_element();
        } else {
            self.position_slider_at_selected();
            self.select(self.selected_index as isize, SelectOptions::reselect());
        }
        self.update_selection_ui();
    }
}
