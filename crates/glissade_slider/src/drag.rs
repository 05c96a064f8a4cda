//! Pointer gestures
//!
//! A press becomes a drag once it moves more than [`DRAG_THRESHOLD`]
//! horizontally. While dragging the slider follows the pointer with rubber
//! band resistance past the first and last cells. On release the flick
//! velocity is measured from the last two moves and the slider selects the
//! cell nearest to where the motion would come to rest.
//!
//! ```text
//! Idle ──down──▶ Pressed ──|dx| > 3──▶ Dragging ──up/cancel──▶ Idle
//!                   │                                  (select resting cell)
//!                   └──up──▶ Idle (static click)
//! ```

use std::time::Duration;

use glissade_animation::TimerId;
use glissade_platform::{EventResponse, Pointer, PointerKind};
use tracing::{debug, trace};

use crate::events::SliderEvent;
use crate::options::TouchVerticalScroll;
use crate::player::PauseReason;
use crate::slider::{SelectOptions, Slider};

/// Horizontal travel before a press becomes a drag
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Vertical travel before a touch press hands over to page scrolling
pub const TOUCH_SCROLL_THRESHOLD: f32 = 10.0;

/// Release velocity, in px per frame, that advances past a resting cell
pub const FLICK_VELOCITY: f32 = 1.0;

/// Pull-back factor applied past the content edges
const EDGE_RESISTANCE: f32 = 0.5;

const FRAME_MS: f32 = 1000.0 / 60.0;

/// Where a pointer gesture is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer down, not yet past the drag threshold
    Pressed,
    Dragging,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct DragState {
    pub phase: DragPhase,
    pointer_id: u64,
    pointer_kind: PointerKind,
    down_x: f32,
    down_y: f32,
    /// Slider position when the drag started
    start_position: f32,
    previous_x: Option<f32>,
    move_time: Option<Duration>,
    previous_move_time: Option<Duration>,
    is_touch_scrolling: bool,
    /// Swallow the native click that follows a drag
    is_preventing_clicks: bool,
}

impl DragState {
    pub fn is_pointer_down(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    fn owns(&self, pointer: &Pointer) -> bool {
        self.is_pointer_down() && pointer.id == self.pointer_id && pointer.kind == self.pointer_kind
    }

    /// End the gesture and return it, keeping click suppression for the
    /// trailing click
    fn release(&mut self) -> DragState {
        let idle = Self {
            is_preventing_clicks: self.is_preventing_clicks,
            ..Self::default()
        };
        std::mem::replace(self, idle)
    }
}

/// Closest resting cell found walking in one direction
#[derive(Clone, Copy, Debug, PartialEq)]
struct RestingCandidate {
    distance: f32,
    index: isize,
}

impl Slider {
    pub(crate) fn pointer_down(&mut self, pointer: Pointer) -> EventResponse {
        if !self.options.draggable || self.cells.is_empty() {
            return EventResponse::IGNORED;
        }
        if self.drag.is_pointer_down() {
            trace!("Slider: ignoring pointer {} while another is down", pointer.id);
            return EventResponse::IGNORED;
        }
        if !pointer.can_press() {
            return EventResponse::IGNORED;
        }

        self.clear_click_guard();
        self.drag = DragState {
            phase: DragPhase::Pressed,
            pointer_id: pointer.id,
            pointer_kind: pointer.kind,
            down_x: pointer.x,
            down_y: pointer.y,
            ..DragState::default()
        };
        self.integrator.set_velocity(0.0);
        self.pause_player_for(PauseReason::Interaction);

        // Touch presses must not block native scrolling
        let response = EventResponse::prevent_default_if(pointer.kind != PointerKind::Touch);
        self.emit(SliderEvent::PointerDown { pointer });
        response
    }

    pub(crate) fn pointer_move(&mut self, pointer: Pointer) -> EventResponse {
        if !self.drag.owns(&pointer) {
            return EventResponse::IGNORED;
        }
        let delta_x = pointer.x - self.drag.down_x;
        let delta_y = pointer.y - self.drag.down_y;

        self.detect_touch_scroll(&pointer, delta_y);
        if self.drag.phase == DragPhase::Pressed
            && !self.drag.is_touch_scrolling
            && delta_x.abs() > DRAG_THRESHOLD
        {
            self.drag_start(&pointer);
        }

        if self.drag.is_dragging() {
            self.drag_move(pointer, delta_x, delta_y);
            // Let the page scroll once it has taken over the gesture
            return EventResponse::prevent_default_if(!self.drag.is_touch_scrolling);
        }
        EventResponse::IGNORED
    }

    pub(crate) fn pointer_up(&mut self, pointer: Pointer) -> EventResponse {
        if !self.drag.owns(&pointer) {
            return EventResponse::IGNORED;
        }
        let gesture = self.drag.release();
        self.emit(SliderEvent::PointerUp {
            pointer: pointer.clone(),
        });
        self.unpause_player_for(PauseReason::Interaction);

        if gesture.is_dragging() {
            self.drag_end(pointer, &gesture);
        } else {
            self.static_click(pointer);
        }
        EventResponse::IGNORED
    }

    /// The platform took the gesture away: end a drag without a click
    pub(crate) fn pointer_cancel(&mut self, pointer: Pointer) -> EventResponse {
        if !self.drag.owns(&pointer) {
            return EventResponse::IGNORED;
        }
        let gesture = self.drag.release();
        debug!("Slider: pointer {} cancelled", pointer.id);
        self.emit(SliderEvent::PointerUp {
            pointer: pointer.clone(),
        });
        self.unpause_player_for(PauseReason::Interaction);

        if gesture.is_dragging() {
            self.drag_end(pointer, &gesture);
        }
        EventResponse::IGNORED
    }

    /// Native click after pointer up
    pub(crate) fn click(&mut self) -> EventResponse {
        if self.drag.is_preventing_clicks {
            self.clear_click_guard();
            return EventResponse::PREVENT_DEFAULT;
        }
        EventResponse::IGNORED
    }

    /// Stop suppressing clicks once the host has had a turn to deliver the
    /// click trailing a drag
    fn arm_click_guard(&mut self) {
        if !self.drag.is_preventing_clicks {
            return;
        }
        if let Some(timer) = self.click_guard.take() {
            self.scheduler.clear_timeout(timer);
        }
        self.click_guard = self.scheduler.set_timeout(Duration::ZERO);
        if self.click_guard.is_none() {
            self.drag.is_preventing_clicks = false;
        }
    }

    pub(crate) fn clear_click_guard(&mut self) {
        self.drag.is_preventing_clicks = false;
        if let Some(timer) = self.click_guard.take() {
            self.scheduler.clear_timeout(timer);
        }
    }

    /// Returns true if `timer` was the click guard
    pub(crate) fn click_guard_fired(&mut self, timer: TimerId) -> bool {
        if self.click_guard != Some(timer) {
            return false;
        }
        self.click_guard = None;
        self.drag.is_preventing_clicks = false;
        trace!("Slider: click suppression expired");
        true
    }

    fn detect_touch_scroll(&mut self, pointer: &Pointer, delta_y: f32) {
        let allowed = match self.options.touch_vertical_scroll {
            TouchVerticalScroll::Disabled => false,
            TouchVerticalScroll::Enabled => !self.drag.is_dragging(),
            TouchVerticalScroll::WithDrag => true,
        };
        if allowed
            && pointer.kind == PointerKind::Touch
            && !self.drag.is_touch_scrolling
            && delta_y.abs() > TOUCH_SCROLL_THRESHOLD
        {
            trace!("Slider: touch {} scrolling the page", pointer.id);
            self.drag.is_touch_scrolling = true;
        }
    }

    fn drag_start(&mut self, pointer: &Pointer) {
        self.drag.phase = DragPhase::Dragging;
        self.drag.start_position = self.integrator.x();
        self.drag.is_preventing_clicks = true;
        self.start_animation();
        debug!("Slider drag started at {}", self.drag.start_position);
        self.emit(SliderEvent::DragStart {
            pointer: pointer.clone(),
        });
    }

    fn drag_move(&mut self, pointer: Pointer, delta_x: f32, delta_y: f32) {
        self.drag.previous_x = Some(self.integrator.x());

        let direction = if self.layout.right_to_left { -1.0 } else { 1.0 };
        let start = self.drag.start_position;
        let mut x = start + delta_x * direction;

        if !self.options.wrap_around {
            if let (Some(first), Some(last)) = (self.cells.first(), self.cells.last()) {
                let origin_bound = (-first.target()).max(start);
                if x > origin_bound {
                    x = (x - origin_bound) * EDGE_RESISTANCE + origin_bound;
                }
                let end_bound = (-last.target()).min(start);
                if x < end_bound {
                    x = (x - end_bound) * EDGE_RESISTANCE + end_bound;
                }
            }
        }

        self.integrator.set_x(x);
        self.drag.previous_move_time = self.drag.move_time;
        self.drag.move_time = Some(pointer.timestamp);
        self.position_slider();

        self.emit(SliderEvent::DragMove {
            pointer,
            delta_x,
            delta_y,
        });
    }

    fn drag_end(&mut self, pointer: Pointer, gesture: &DragState) {
        self.arm_click_guard();
        self.drag_end_flick(gesture);
        if self.options.free_scroll {
            self.is_free_scrolling = true;
        }

        let mut index = self.drag_end_resting_select();
        if self.options.free_scroll && !self.options.wrap_around {
            let resting = -self.resting_position();
            self.is_free_scrolling = match (self.cells.first(), self.cells.last()) {
                (Some(first), Some(last)) => resting > first.target() && resting < last.target(),
                _ => false,
            };
        } else if !self.options.free_scroll && index == self.selected_index as isize {
            index += self.drag_end_boost_select();
        }

        debug!(
            "Slider drag ended: velocity {:.2}, selecting {}",
            self.integrator.velocity(),
            index
        );
        self.select(index, SelectOptions::default());
        self.emit(SliderEvent::DragEnd { pointer });

        if let Some(width) = self.deferred_resize.take() {
            self.resize(width);
        }
    }

    /// Velocity from the last two moves, in px per 60Hz frame
    fn drag_end_flick(&mut self, gesture: &DragState) {
        let (Some(previous_x), Some(time), Some(previous_time)) = (
            gesture.previous_x,
            gesture.move_time,
            gesture.previous_move_time,
        ) else {
            return;
        };
        let elapsed = time.saturating_sub(previous_time).as_secs_f32() * 1000.0;
        if elapsed > 0.0 {
            let frames = elapsed / FRAME_MS;
            self.integrator
                .set_velocity((self.integrator.x() - previous_x) / frames);
        }
    }

    /// Index of the cell nearest the projected resting position
    fn drag_end_resting_select(&self) -> isize {
        let resting = self.resting_position();
        let selected = self.selected_index as isize;
        let Some(distance) = self.cell_distance(-resting, selected) else {
            return selected;
        };
        let distance = distance.abs();

        let forward = self.closest_resting(resting, distance, 1);
        let backward = self.closest_resting(resting, distance, -1);

        let index = if forward.distance < backward.distance {
            forward.index
        } else if backward.distance < forward.distance {
            backward.index
        } else if forward.index == selected || backward.index == selected {
            selected
        } else {
            backward.index
        };

        if self.options.contain && !self.options.wrap_around && (index - selected).abs() <= 1 {
            selected
        } else {
            index
        }
    }

    /// Walk from the selection while cells keep getting closer to `resting`
    fn closest_resting(&self, resting: f32, distance: f32, step: isize) -> RestingCandidate {
        let contained = self.options.contain && !self.options.wrap_around;
        let mut index = self.selected_index as isize;
        let mut min_distance = f32::INFINITY;
        let mut distance = distance;

        // Contained cells share targets at the edges, so ties keep walking
        while if contained {
            distance <= min_distance
        } else {
            distance < min_distance
        } {
            index += step;
            min_distance = distance;
            match self.cell_distance(-resting, index) {
                Some(next) => distance = next.abs(),
                None => break,
            }
        }

        RestingCandidate {
            distance: min_distance,
            index: index - step,
        }
    }

    /// Signed distance from `x` to the target of cell `index`
    ///
    /// With wrapping, indices outside the cell range refer to the same cells
    /// one or more cycles away.
    pub(crate) fn cell_distance(&self, x: f32, index: isize) -> Option<f32> {
        let len = self.cells.len() as isize;
        let (cell_index, cycle) = if self.options.wrap_around && len > 1 {
            (index.rem_euclid(len), index.div_euclid(len))
        } else {
            (index, 0)
        };
        let cell = usize::try_from(cell_index).ok().and_then(|i| self.cells.get(i))?;
        Some(x - (cell.target() + self.slideable_width * cycle as f32))
    }

    /// Advance one cell when flicked toward a neighbour
    fn drag_end_boost_select(&self) -> isize {
        let velocity = self.integrator.velocity();
        let Some(distance) = self.cell_distance(-self.integrator.x(), self.selected_index as isize)
        else {
            return 0;
        };
        if distance > 0.0 && velocity < -FLICK_VELOCITY {
            1
        } else if distance < 0.0 && velocity > FLICK_VELOCITY {
            -1
        } else {
            0
        }
    }

    fn static_click(&mut self, pointer: Pointer) {
        let cell = pointer.target.filter(|element| self.cell_index(*element).is_some());
        let index = cell.and_then(|element| self.cell_index(element));
        trace!("Slider static click on {:?}", index);
        self.emit(SliderEvent::StaticClick {
            pointer,
            cell,
            index,
        });
    }
}
