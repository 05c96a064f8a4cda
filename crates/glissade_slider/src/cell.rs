//! Cells: the slides inside a slider

use glissade_core::ElementId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SliderError};

/// Measured box of a cell element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl CellSize {
    /// Create a size without margins
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let size = Self {
            width,
            height,
            ..Default::default()
        };
        size.validate()?;
        Ok(size)
    }

    /// Set horizontal margins
    pub fn with_margins(mut self, margin_left: f32, margin_right: f32) -> Result<Self> {
        self.margin_left = margin_left;
        self.margin_right = margin_right;
        self.validate()?;
        Ok(self)
    }

    /// Check that every dimension is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("marginLeft", self.margin_left),
            ("marginRight", self.margin_right),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SliderError::InvalidCellSize(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Width including horizontal margins
    pub fn outer_width(&self) -> f32 {
        self.width + self.margin_left + self.margin_right
    }

    /// Margin on the side cells are laid out from
    pub fn origin_margin(&self, right_to_left: bool) -> f32 {
        if right_to_left {
            self.margin_right
        } else {
            self.margin_left
        }
    }

    /// Margin on the side opposite the origin
    pub fn end_margin(&self, right_to_left: bool) -> f32 {
        if right_to_left {
            self.margin_left
        } else {
            self.margin_right
        }
    }
}

/// A slide and its computed layout
///
/// `x` is the offset of the cell's outer box from the start of the content
/// strip. `target` is the slider offset at which this cell sits on the
/// alignment cursor. `shift` is -1, 0 or +1: which wrap copy is rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    element: ElementId,
    size: CellSize,
    x: f32,
    target: f32,
    shift: i8,
}

impl Cell {
    pub fn new(element: ElementId, size: CellSize) -> Self {
        Self {
            element,
            size,
            x: 0.0,
            target: 0.0,
            shift: 0,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn size(&self) -> CellSize {
        self.size
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn shift(&self) -> i8 {
        self.shift
    }

    /// Render offset from the start of the content strip
    pub fn render_x(&self, cycle_width: f32) -> f32 {
        self.x + cycle_width * f32::from(self.shift)
    }

    pub(crate) fn set_size(&mut self, size: CellSize) {
        self.size = size;
    }

    /// Place the cell and reset its target for the given alignment
    pub(crate) fn set_position(&mut self, x: f32, align: f32, right_to_left: bool) {
        self.x = x;
        self.set_default_target(align, right_to_left);
    }

    pub(crate) fn set_default_target(&mut self, align: f32, right_to_left: bool) {
        self.target = self.x + self.size.origin_margin(right_to_left) + self.size.width * align;
    }

    pub(crate) fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub(crate) fn set_shift(&mut self, shift: i8) {
        self.shift = shift;
    }
}
