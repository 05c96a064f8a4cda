//! Position engine
//!
//! Lays cells out along the content strip, computes each cell's target
//! offset, clamps targets for `contain`, and picks the wrap shadow cells
//! that fill the gaps at either end of the viewport when wrapping.
//!
//! All functions here are pure over a cell slice so the slider can call
//! them after any structural change.

use serde::Serialize;
use smallvec::SmallVec;

use crate::cell::Cell;

/// Viewport geometry the layout is computed against
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// Inner width of the viewport
    pub viewport_width: f32,
    /// Alignment fraction measured from the origin side
    pub align: f32,
    pub right_to_left: bool,
}

impl Layout {
    /// Offset of the alignment cursor inside the viewport
    pub fn cursor_position(&self) -> f32 {
        self.viewport_width * self.align
    }
}

/// Lay out cells starting at `from`, continuing after the previous cell
///
/// Returns the total width of the content strip.
pub fn position_cells(cells: &mut [Cell], from: usize, layout: &Layout) -> f32 {
    let from = from.min(cells.len());
    let mut x = match from.checked_sub(1).and_then(|i| cells.get(i)) {
        Some(previous) => previous.x() + previous.size().outer_width(),
        None => 0.0,
    };

    for cell in &mut cells[from..] {
        cell.set_position(x, layout.align, layout.right_to_left);
        x += cell.size().outer_width();
    }

    cells
        .last()
        .map(|last| last.x() + last.size().outer_width())
        .unwrap_or(0.0)
}

/// Clamp targets so the content never scrolls past its edges
///
/// When the content is narrower than the viewport every target collapses to
/// the same offset.
pub fn contain_cells(cells: &mut [Cell], slideable_width: f32, layout: &Layout) {
    let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
        return;
    };
    let rtl = layout.right_to_left;
    let first_margin = first.size().origin_margin(rtl);
    let content_width = slideable_width - last.size().end_margin(rtl);
    let end_limit = content_width - layout.viewport_width * (1.0 - layout.align);
    let is_content_smaller = content_width < layout.viewport_width;
    let start_limit = layout.cursor_position() + first_margin;

    for cell in cells.iter_mut() {
        cell.set_default_target(layout.align, rtl);
        if is_content_smaller {
            cell.set_target(content_width * layout.align);
        } else {
            cell.set_target(cell.target().max(start_limit).min(end_limit));
        }
    }
}

/// Indices of the cells rendered from the other end of the strip
pub type GapCells = SmallVec<[usize; 4]>;

/// Shadow cells on either side of the viewport when wrapping
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WrapCells {
    /// Tail cells drawn before the first cell
    pub before: GapCells,
    /// Head cells drawn after the last cell
    pub after: GapCells,
}

impl WrapCells {
    /// Compute the shadow cells for the current layout
    ///
    /// No shadows are needed when the whole strip fits in the viewport.
    pub fn compute(cells: &[Cell], slideable_width: f32, layout: &Layout) -> Self {
        if cells.is_empty() || slideable_width <= layout.viewport_width {
            return Self::default();
        }
        let cursor = layout.cursor_position();
        Self {
            before: gap_cells(cells, cursor, cells.len() - 1, -1),
            after: gap_cells(cells, layout.viewport_width - cursor, 0, 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Shift shadows for a wrapped slider offset
    ///
    /// `x` is the offset already reduced into `[-cycle, 0)`. A shadow is
    /// moved one cycle while the gap it fills is still open.
    pub fn shift(&self, cells: &mut [Cell], x: f32, slideable_width: f32, layout: &Layout) {
        let cursor = layout.cursor_position();
        shift_cells(cells, &self.before, cursor + x, -1);
        let after_gap = layout.viewport_width - (x + slideable_width + cursor);
        shift_cells(cells, &self.after, after_gap, 1);
    }
}

/// Walk from `start` in `step` direction until `gap` is covered
fn gap_cells(cells: &[Cell], mut gap: f32, start: usize, step: isize) -> GapCells {
    let mut indices = GapCells::new();
    let mut index = start as isize;
    while gap > 0.0 {
        let Some(cell) = usize::try_from(index).ok().and_then(|i| cells.get(i)) else {
            break;
        };
        indices.push(index as usize);
        index += step;
        gap -= cell.size().outer_width();
    }
    indices
}

fn shift_cells(cells: &mut [Cell], indices: &[usize], mut gap: f32, direction: i8) {
    for &index in indices {
        let Some(cell) = cells.get_mut(index) else {
            continue;
        };
        cell.set_shift(if gap > 0.0 { direction } else { 0 });
        gap -= cell.size().outer_width();
    }
}

/// Floored remainder, always in `[0, m)` for positive `m`
pub fn modulo(n: f32, m: f32) -> f32 {
    ((n % m) + m) % m
}

/// A rendered offset along the origin side
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum PositionValue {
    Px(f32),
    Percent(f32),
}

impl PositionValue {
    /// Express `offset` in pixels, or as a viewport percentage rounded to
    /// 0.01%
    pub fn new(offset: f32, viewport_width: f32, percent: bool) -> Self {
        if percent && viewport_width > 0.0 {
            PositionValue::Percent((offset / viewport_width * 10_000.0).round() / 100.0)
        } else {
            PositionValue::Px(offset.round())
        }
    }
}

impl std::fmt::Display for PositionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionValue::Px(value) => write!(f, "{}px", value),
            PositionValue::Percent(value) => write!(f, "{}%", value),
        }
    }
}
