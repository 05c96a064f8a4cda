//! Render output
//!
//! The slider never touches host elements. After each frame or state change
//! the host reads a [`RenderState`] and applies it: the strip offset, each
//! cell's offset along the origin side, selection classes, and the gallery
//! height.

use glissade_core::ElementId;
use serde::Serialize;

use crate::page_dots::PageDots;
use crate::position::PositionValue;
use crate::prev_next::PrevNextButton;

/// Side that offsets are measured from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginSide {
    Left,
    Right,
}

/// Rendered cell
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRender {
    pub element: ElementId,
    /// Offset of the cell inside the strip
    pub offset: PositionValue,
    pub is_selected: bool,
    /// Mirrors the selection of a companion slider
    pub is_nav_selected: bool,
}

/// Snapshot of everything the host draws
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    pub origin: OriginSide,
    /// Offset of the strip inside the viewport
    pub slider_offset: PositionValue,
    pub cells: Vec<CellRender>,
    /// Tallest cell, when the gallery is sized by the slider
    pub gallery_height: Option<f32>,
    pub selected_index: Option<usize>,
    pub is_animating: bool,
    pub is_dragging: bool,
    pub is_pointer_down: bool,
    pub page_dots: Option<PageDots>,
    pub prev_button: Option<PrevNextButton>,
    pub next_button: Option<PrevNextButton>,
}
