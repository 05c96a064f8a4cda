//! The slider widget
//!
//! ```text
//! HostEvent ──▶ handle_event ──▶ drag / keys / resize / hover / visibility
//!                                        │
//!                          select() ◀────┘
//!                             │ start ticking
//!                             ▼
//! FrameScheduler ──▶ animate(): attract ─▶ integrate ─▶ position ─▶ settle?
//! ```
//!
//! The slider is passive. It registers a tick with its [`FrameScheduler`]
//! while moving and a one-shot timer for autoplay and resize debouncing; the
//! host drives both by passing the slider into its scheduler. Output is read
//! back with [`Slider::render_state`].

use std::fmt;
use std::time::Duration;

use glissade_animation::{Animate, ControlFlow, FrameScheduler, Integrator, TickId, TimerId};
use glissade_core::{ElementId, EventEmitter, ListenerId};
use glissade_platform::{EventResponse, HostEvent, InputEvent, Key, KeyboardEvent, Visibility};
use tracing::{debug, trace, warn};

use crate::cell::Cell;
use crate::drag::{DragPhase, DragState};
use crate::error::Result;
use crate::events::{SliderEvent, SliderEventKind};
use crate::options::SliderOptions;
use crate::page_dots::PageDots;
use crate::player::{PauseReason, Player};
use crate::position::{self, modulo, Layout, PositionValue, WrapCells};
use crate::prev_next::{Direction, PrevNextButton};
use crate::render::{CellRender, OriginSide, RenderState};

/// Host resize events are coalesced over this window
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// How a selection is applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Wrap out-of-range indices even without `wrapAround`
    pub wrap: bool,
    /// Re-select and notify even if the index is already selected
    pub force: bool,
    /// Jump to the target instead of animating
    pub instant: bool,
}

impl SelectOptions {
    pub fn wrapped() -> Self {
        Self {
            wrap: true,
            ..Default::default()
        }
    }

    pub(crate) fn reselect() -> Self {
        Self {
            force: true,
            instant: true,
            ..Default::default()
        }
    }
}

/// A draggable, physics-driven carousel
pub struct Slider {
    pub(crate) options: SliderOptions,
    pub(crate) scheduler: Box<dyn FrameScheduler>,
    pub(crate) emitter: EventEmitter<SliderEvent>,

    pub(crate) cells: Vec<Cell>,
    pub(crate) layout: Layout,
    /// Total width of the content strip, one wrap cycle
    pub(crate) slideable_width: f32,
    pub(crate) wrap_cells: WrapCells,

    pub(crate) integrator: Integrator,
    /// Horizontal translation of the strip after the last position pass
    slider_offset: f32,
    pub(crate) selected_index: usize,
    selected_element: Option<ElementId>,
    /// Cell highlighted as mirroring a companion slider's selection
    pub(crate) nav_selected: Option<ElementId>,
    animation: Option<TickId>,
    pub(crate) is_free_scrolling: bool,

    is_active: bool,
    is_destroyed: bool,

    pub(crate) drag: DragState,
    /// Zero-delay timer ending click suppression after a drag
    pub(crate) click_guard: Option<TimerId>,
    /// Viewport width received mid-drag, applied on release
    pub(crate) deferred_resize: Option<f32>,
    pending_resize: Option<(TimerId, f32)>,

    pub(crate) player: Option<Player>,
    page_dots: Option<PageDots>,
    prev_button: Option<PrevNextButton>,
    next_button: Option<PrevNextButton>,
}

impl Slider {
    /// Create an inactive slider
    ///
    /// Call [`activate`](Self::activate) with the measured viewport and cells
    /// to start.
    pub fn new(options: SliderOptions, scheduler: impl FrameScheduler + 'static) -> Result<Self> {
        options.validate()?;

        let layout = Layout {
            viewport_width: 0.0,
            align: options.align_fraction(),
            right_to_left: options.right_to_left,
        };
        let player = options.auto_play.interval().map(Player::new);
        let page_dots = options.page_dots.then(PageDots::new);
        let (prev_button, next_button) = if options.prev_next_buttons {
            (
                Some(PrevNextButton::new(Direction::Previous, options.right_to_left)),
                Some(PrevNextButton::new(Direction::Next, options.right_to_left)),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            selected_index: options.initial_cell(usize::MAX),
            options,
            scheduler: Box::new(scheduler),
            emitter: EventEmitter::new(),
            cells: Vec::new(),
            layout,
            slideable_width: 0.0,
            wrap_cells: WrapCells::default(),
            integrator: Integrator::default(),
            slider_offset: 0.0,
            selected_element: None,
            nav_selected: None,
            animation: None,
            is_free_scrolling: false,
            is_active: false,
            is_destroyed: false,
            drag: DragState::default(),
            click_guard: None,
            deferred_resize: None,
            pending_resize: None,
            player,
            page_dots,
            prev_button,
            next_button,
        })
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Subscribe to a kind of slider event
    pub fn on<F>(&mut self, kind: SliderEventKind, callback: F) -> ListenerId
    where
        F: Fn(&SliderEvent) + 'static,
    {
        self.emitter.on(kind, callback)
    }

    /// Subscribe to the next event of a kind
    pub fn once<F>(&mut self, kind: SliderEventKind, callback: F) -> ListenerId
    where
        F: Fn(&SliderEvent) + 'static,
    {
        self.emitter.once(kind, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub(crate) fn emit(&mut self, event: SliderEvent) {
        self.emitter.emit(&event);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Lay out `cells` in a viewport of the given width and select the
    /// current index
    ///
    /// No-op if already active or destroyed.
    pub fn activate(&mut self, viewport_width: f32, cells: Vec<Cell>) {
        if self.is_destroyed || self.is_active {
            return;
        }
        self.is_active = true;
        self.layout.viewport_width = viewport_width.max(0.0);
        self.set_cells(cells);
        self.selected_index = self.selected_index.min(self.cells.len().saturating_sub(1));

        debug!(
            "Slider activated: {} cells, viewport {}px, selected {}",
            self.cells.len(),
            self.layout.viewport_width,
            self.selected_index
        );
        self.emit(SliderEvent::Activate);

        self.position_slider_at_selected();
        self.select(self.selected_index as isize, SelectOptions::reselect());
        self.update_selection_ui();

        if let Some(player) = self.player.as_mut() {
            player.play(self.scheduler.as_ref());
        }
    }

    /// Stop animating and release the cells
    ///
    /// The selected index is kept for a later re-activation.
    pub fn deactivate(&mut self) {
        if !self.is_active {
            return;
        }
        self.stop_animation();
        if let Some(player) = self.player.as_mut() {
            player.stop(self.scheduler.as_ref());
        }
        if let Some((timer, _)) = self.pending_resize.take() {
            self.scheduler.clear_timeout(timer);
        }
        self.clear_click_guard();
        self.drag = DragState::default();
        self.deferred_resize = None;
        self.is_free_scrolling = false;

        self.cells.clear();
        self.wrap_cells = WrapCells::default();
        self.slideable_width = 0.0;
        self.selected_element = None;
        self.nav_selected = None;
        self.is_active = false;
        self.update_selection_ui();

        debug!("Slider deactivated");
        self.emit(SliderEvent::Deactivate);
    }

    /// Deactivate, notify `destroy`, and detach every listener
    ///
    /// A destroyed slider ignores all further calls.
    pub fn destroy(&mut self) {
        if self.is_destroyed {
            return;
        }
        self.deactivate();
        self.emit(SliderEvent::Destroy);
        self.emitter.clear();
        self.is_destroyed = true;
        debug!("Slider destroyed");
    }

    /// Activate or deactivate from a host breakpoint reading
    ///
    /// `matches` is whether the page's breakpoint enables the slider, None
    /// when the host cannot tell. Only applies with the `watchCSS` option;
    /// `cells` are used when the reading activates the slider. Returns
    /// whether the slider is active afterwards.
    pub fn watch_breakpoint(
        &mut self,
        matches: Option<bool>,
        viewport_width: f32,
        cells: Vec<Cell>,
    ) -> bool {
        match self.options.watch_css.wants_active(matches) {
            Some(true) if !self.is_active => {
                debug!("Slider breakpoint matched, activating");
                self.activate(viewport_width, cells);
            }
            Some(false) if self.is_active => {
                debug!("Slider breakpoint left, deactivating");
                self.deactivate();
            }
            _ => {}
        }
        self.is_active
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the cell at `index`
    ///
    /// With `wrapAround` (or `options.wrap`) the index wraps modulo the cell
    /// count; with `wrapAround` the position is also offset by one cycle so
    /// the motion continues in the same direction. Out-of-range indices are
    /// ignored otherwise. Returns true if the selection was applied.
    pub fn select(&mut self, index: isize, options: SelectOptions) -> bool {
        if !self.is_active || self.cells.is_empty() {
            return false;
        }
        let len = self.cells.len() as isize;
        let resolved = if self.options.wrap_around || options.wrap {
            index.rem_euclid(len)
        } else {
            index
        };
        if !(0..len).contains(&resolved) {
            trace!("Slider: select({}) out of range, {} cells", index, len);
            return false;
        }
        let resolved = resolved as usize;

        // Crossing the seam keeps x within one cycle of the new target
        let crossed = self.options.wrap_around && len > 1 && !(0..len).contains(&index);
        if crossed {
            let cycle = if index < 0 {
                -self.slideable_width
            } else {
                self.slideable_width
            };
            self.integrator.translate(cycle);
        }

        if resolved == self.selected_index && self.selected_element.is_some() && !options.force {
            if crossed {
                self.start_animation();
            }
            return false;
        }

        self.selected_index = resolved;
        self.selected_element = Some(self.cells[resolved].element());
        if options.instant {
            self.position_slider_at_selected();
        } else {
            self.start_animation();
        }
        self.update_selection_ui();

        debug!("Slider selected {}", resolved);
        self.emit(SliderEvent::Select { index: resolved });
        true
    }

    pub fn previous(&mut self, wrap: bool) -> bool {
        self.select(
            self.selected_index as isize - 1,
            SelectOptions {
                wrap,
                ..Default::default()
            },
        )
    }

    pub fn next(&mut self, wrap: bool) -> bool {
        self.select(
            self.selected_index as isize + 1,
            SelectOptions {
                wrap,
                ..Default::default()
            },
        )
    }

    /// Select the cell holding `element`
    pub fn select_cell(&mut self, element: ElementId, options: SelectOptions) -> bool {
        match self.cell_index(element) {
            Some(index) => self.select(index as isize, options),
            None => false,
        }
    }

    /// Index of the selected cell, None without cells
    pub fn selected_index(&self) -> Option<usize> {
        (self.selected_index < self.cells.len()).then_some(self.selected_index)
    }

    pub fn selected_element(&self) -> Option<ElementId> {
        self.selected_element
    }

    pub fn selected_cell(&self) -> Option<&Cell> {
        self.cells.get(self.selected_index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_index(&self, element: ElementId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.element() == element)
    }

    pub(crate) fn sync_selected_element(&mut self) {
        self.selected_element = self.selected_cell().map(Cell::element);
    }

    /// Forget free scrolling and stop autoplay after direct navigation
    pub(crate) fn ui_change(&mut self) {
        self.is_free_scrolling = false;
        if let Some(player) = self.player.as_mut() {
            player.stop(self.scheduler.as_ref());
        }
        self.emit(SliderEvent::UiChange);
    }

    pub(crate) fn update_selection_ui(&mut self) {
        let len = self.cells.len();
        let selected = self.selected_index;
        let wrap = self.options.wrap_around;

        if let Some(dots) = self.page_dots.as_mut() {
            dots.set_count(len);
            dots.update_selected(selected);
        }
        for button in [self.prev_button.as_mut(), self.next_button.as_mut()]
            .into_iter()
            .flatten()
        {
            button.update(len, selected, wrap);
        }
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    pub fn x(&self) -> f32 {
        self.integrator.x()
    }

    pub fn velocity(&self) -> f32 {
        self.integrator.velocity()
    }

    pub fn slideable_width(&self) -> f32 {
        self.slideable_width
    }

    pub fn viewport_width(&self) -> f32 {
        self.layout.viewport_width
    }

    pub fn cursor_position(&self) -> f32 {
        self.layout.cursor_position()
    }

    /// Where the current motion would come to rest
    pub fn resting_position(&self) -> f32 {
        self.integrator.resting_position(self.friction())
    }

    pub(crate) fn friction(&self) -> f32 {
        if self.is_free_scrolling {
            self.options.free_scroll_friction
        } else {
            self.options.friction
        }
    }

    /// Replace every cell and lay them out from scratch
    pub(crate) fn set_cells(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
        self.position_cells(0);
        self.update_wrap_cells();
    }

    pub(crate) fn position_cells(&mut self, from: usize) {
        self.slideable_width = position::position_cells(&mut self.cells, from, &self.layout);
        if self.options.contain && !self.options.wrap_around {
            position::contain_cells(&mut self.cells, self.slideable_width, &self.layout);
        }
    }

    pub(crate) fn update_wrap_cells(&mut self) {
        if !self.options.wrap_around {
            return;
        }
        for cell in self.cells.iter_mut() {
            cell.set_shift(0);
        }
        self.wrap_cells = WrapCells::compute(&self.cells, self.slideable_width, &self.layout);
    }

    /// Translate the strip for the current position
    pub(crate) fn position_slider(&mut self) {
        let mut x = self.integrator.x();
        if self.options.wrap_around && self.cells.len() > 1 && self.slideable_width > 0.0 {
            x = modulo(x, self.slideable_width) - self.slideable_width;
            self.wrap_cells
                .shift(&mut self.cells, x, self.slideable_width, &self.layout);
        }
        x += self.layout.cursor_position();
        self.slider_offset = if self.layout.right_to_left { -x } else { x };
    }

    pub(crate) fn position_slider_at_selected(&mut self) {
        if let Some(target) = self.cells.get(self.selected_index).map(Cell::target) {
            self.integrator.set_x(-target);
            self.position_slider();
        }
    }

    // =========================================================================
    // Animation
    // =========================================================================

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_free_scrolling(&self) -> bool {
        self.is_free_scrolling
    }

    pub(crate) fn start_animation(&mut self) {
        if self.animation.is_some() {
            return;
        }
        self.integrator.reset_resting();
        self.animation = self.scheduler.start_ticking();
        if self.animation.is_none() {
            warn!("Slider: scheduler is gone, animation not started");
        }
    }

    pub(crate) fn stop_animation(&mut self) {
        if let Some(tick) = self.animation.take() {
            self.scheduler.stop_ticking(tick);
        }
    }

    /// Position the selected cell pulls toward, None while dragging or gliding
    fn attraction_target(&self) -> Option<f32> {
        if self.drag.is_pointer_down() || self.is_free_scrolling {
            return None;
        }
        self.cells.get(self.selected_index).map(|cell| -cell.target())
    }

    fn apply_selected_attraction(&mut self) {
        if let Some(target) = self.attraction_target() {
            self.integrator
                .attract(target, self.options.selected_attraction);
        }
    }

    fn settle(&mut self) {
        self.is_free_scrolling = false;
        self.position_slider();
        trace!("Slider settled at {} on {}", self.integrator.x(), self.selected_index);
        self.emit(SliderEvent::Settle {
            index: self.selected_index,
        });
        if let Some(player) = self.player.as_mut() {
            player.arm(self.scheduler.as_ref());
        }
    }

    fn advance_autoplay(&mut self) {
        trace!("Slider autoplay advancing from {}", self.selected_index);
        self.next(true);
        // Nothing will settle, keep the player cycling
        if !self.is_animating() {
            if let Some(player) = self.player.as_mut() {
                player.arm(self.scheduler.as_ref());
            }
        }
    }

    // =========================================================================
    // Auxiliary UI
    // =========================================================================

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Start autoplay (requires the `autoPlay` option)
    pub fn play_player(&mut self) {
        if !self.is_active {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.play(self.scheduler.as_ref());
        }
    }

    pub fn stop_player(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.stop(self.scheduler.as_ref());
        }
    }

    pub fn pause_player(&mut self) {
        self.pause_player_for(PauseReason::Host);
    }

    pub fn unpause_player(&mut self) {
        self.unpause_player_for(PauseReason::Host);
    }

    pub(crate) fn pause_player_for(&mut self, reason: PauseReason) {
        if let Some(player) = self.player.as_mut() {
            player.pause(reason, self.scheduler.as_ref());
        }
    }

    pub(crate) fn unpause_player_for(&mut self, reason: PauseReason) {
        if let Some(player) = self.player.as_mut() {
            player.unpause(reason, self.scheduler.as_ref());
        }
    }

    pub fn page_dots(&self) -> Option<&PageDots> {
        self.page_dots.as_ref()
    }

    pub fn prev_button(&self) -> Option<&PrevNextButton> {
        self.prev_button.as_ref()
    }

    pub fn next_button(&self) -> Option<&PrevNextButton> {
        self.next_button.as_ref()
    }

    /// Handle a tap on page dot `index`
    pub fn tap_page_dot(&mut self, index: usize) -> bool {
        let exists = self
            .page_dots
            .as_ref()
            .is_some_and(|dots| index < dots.count());
        if !self.is_active || !exists {
            return false;
        }
        self.ui_change();
        self.select(index as isize, SelectOptions::default())
    }

    /// Handle a tap on the previous or next button
    pub fn tap_button(&mut self, direction: Direction) -> bool {
        let button = match direction {
            Direction::Previous => self.prev_button,
            Direction::Next => self.next_button,
        };
        if !self.is_active || !button.is_some_and(|button| button.is_enabled()) {
            return false;
        }
        self.ui_change();
        self.select(
            self.selected_index as isize + direction.step(),
            SelectOptions::default(),
        )
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Route a host event and tell the host what to do with it
    pub fn handle_event(&mut self, event: HostEvent) -> EventResponse {
        if !self.is_active {
            return EventResponse::IGNORED;
        }
        match event {
            HostEvent::Input(input) => match input {
                InputEvent::PointerDown(pointer) => self.pointer_down(pointer),
                InputEvent::PointerMove(pointer) => self.pointer_move(pointer),
                InputEvent::PointerUp(pointer) => self.pointer_up(pointer),
                InputEvent::PointerCancel(pointer) => self.pointer_cancel(pointer),
                InputEvent::Click { .. } => self.click(),
                InputEvent::Key(key) => self.key_down(&key),
            },
            HostEvent::Resized { width } => {
                self.schedule_resize(width);
                EventResponse::IGNORED
            }
            HostEvent::Visibility(Visibility::Hidden) => {
                self.pause_player_for(PauseReason::Hidden);
                EventResponse::IGNORED
            }
            HostEvent::Visibility(Visibility::Visible) => {
                self.unpause_player_for(PauseReason::Hidden);
                EventResponse::IGNORED
            }
            HostEvent::PointerEntered => {
                if self.options.pause_auto_play_on_hover {
                    self.pause_player_for(PauseReason::Hover);
                }
                EventResponse::IGNORED
            }
            HostEvent::PointerLeft => {
                self.unpause_player_for(PauseReason::Hover);
                EventResponse::IGNORED
            }
        }
    }

    fn key_down(&mut self, event: &KeyboardEvent) -> EventResponse {
        if !self.options.accessibility {
            return EventResponse::IGNORED;
        }
        let forward = match event.key {
            Key::ArrowLeft => self.layout.right_to_left,
            Key::ArrowRight => !self.layout.right_to_left,
            Key::Other(_) => return EventResponse::IGNORED,
        };
        self.ui_change();
        if forward {
            self.next(false);
        } else {
            self.previous(false);
        }
        EventResponse::IGNORED
    }

    /// Debounce a host resize
    fn schedule_resize(&mut self, width: f32) {
        if !self.options.resize {
            return;
        }
        if let Some((timer, _)) = self.pending_resize.take() {
            self.scheduler.clear_timeout(timer);
        }
        match self.scheduler.set_timeout(RESIZE_DEBOUNCE) {
            Some(timer) => self.pending_resize = Some((timer, width)),
            None => self.resize(width),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.drag.is_pointer_down()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase
    }

    /// Translation of the strip inside the viewport, positive to the right
    pub fn slider_offset(&self) -> f32 {
        self.slider_offset
    }

    /// Height of the tallest cell
    pub fn max_cell_height(&self) -> f32 {
        self.cells
            .iter()
            .map(|cell| cell.size().height)
            .fold(0.0, f32::max)
    }

    /// Snapshot of everything the host needs to draw
    pub fn render_state(&self) -> RenderState {
        let viewport_width = self.layout.viewport_width;
        let percent = self.options.percent_position;
        let selected = self.selected_index();

        RenderState {
            origin: if self.layout.right_to_left {
                OriginSide::Right
            } else {
                OriginSide::Left
            },
            slider_offset: PositionValue::new(self.slider_offset, viewport_width, percent),
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(index, cell)| CellRender {
                    element: cell.element(),
                    offset: PositionValue::new(
                        cell.render_x(self.slideable_width),
                        viewport_width,
                        percent,
                    ),
                    is_selected: selected == Some(index),
                    is_nav_selected: self.nav_selected == Some(cell.element()),
                })
                .collect(),
            gallery_height: self
                .options
                .set_gallery_size
                .then(|| self.max_cell_height()),
            selected_index: selected,
            is_animating: self.is_animating(),
            is_dragging: self.is_dragging(),
            is_pointer_down: self.is_pointer_down(),
            page_dots: self.page_dots.clone(),
            prev_button: self.prev_button,
            next_button: self.next_button,
        }
    }
}

impl Animate for Slider {
    fn animate(&mut self, tick: TickId, _now: Duration) -> ControlFlow {
        if self.animation != Some(tick) {
            return ControlFlow::Stop;
        }

        self.apply_selected_attraction();
        let previous_x = self.integrator.x();
        self.integrator.integrate(self.friction());
        self.position_slider();

        if self.integrator.settle(
            previous_x,
            self.drag.is_pointer_down(),
            self.attraction_target(),
        ) {
            self.animation = None;
            self.settle();
            return ControlFlow::Stop;
        }
        ControlFlow::Continue
    }

    fn fire_timer(&mut self, timer: TimerId, _now: Duration) {
        if !self.is_active {
            return;
        }
        if self.click_guard_fired(timer) {
            return;
        }
        if let Some((pending, width)) = self.pending_resize {
            if pending == timer {
                self.pending_resize = None;
                self.resize(width);
                return;
            }
        }
        let advance = self
            .player
            .as_mut()
            .is_some_and(|player| player.timer_fired(timer));
        if advance {
            self.advance_autoplay();
        }
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("cells", &self.cells.len())
            .field("selected_index", &self.selected_index)
            .field("x", &self.integrator.x())
            .field("is_animating", &self.is_animating())
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellSize;
    use crate::options::WatchCss;
    use glissade_animation::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cells(count: usize, width: f32) -> Vec<Cell> {
        (0..count)
            .map(|i| Cell::new(ElementId(i as u64), CellSize::new(width, 100.0).unwrap()))
            .collect()
    }

    fn slider(options: SliderOptions, count: usize) -> (ManualScheduler, Slider) {
        let scheduler = ManualScheduler::new();
        let mut slider = Slider::new(options, scheduler.handle()).unwrap();
        slider.activate(300.0, cells(count, 100.0));
        (scheduler, slider)
    }

    fn record(slider: &mut Slider, kind: SliderEventKind) -> Rc<RefCell<Vec<SliderEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        slider.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn test_activate_positions_at_initial_index() {
        let options = SliderOptions {
            initial_index: 2,
            ..Default::default()
        };
        let (scheduler, slider) = slider(options, 5);

        assert!(slider.is_active());
        assert_eq!(slider.selected_index(), Some(2));
        assert_eq!(slider.selected_element(), Some(ElementId(2)));
        assert_eq!(slider.x(), -250.0);
        // Cell 2 centered: strip moved by cursor - target
        assert_eq!(slider.slider_offset(), 150.0 - 250.0);
        assert!(!slider.is_animating());
        assert_eq!(scheduler.active_ticks(), 0);
    }

    #[test]
    fn test_initial_index_clamped_to_cells() {
        let options = SliderOptions {
            initial_index: 9,
            ..Default::default()
        };
        let (_scheduler, slider) = slider(options, 3);
        assert_eq!(slider.selected_index(), Some(2));
    }

    #[test]
    fn test_negative_initial_index_selects_first_cell() {
        let options = SliderOptions {
            initial_index: -3,
            ..Default::default()
        };
        let (_scheduler, slider) = slider(options, 3);
        assert_eq!(slider.selected_index(), Some(0));
        assert_eq!(slider.x(), -50.0);
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        let selects = record(&mut slider, SliderEventKind::Select);

        assert!(!slider.select(10, SelectOptions::default()));
        assert!(!slider.select(-1, SelectOptions::default()));
        assert!(!slider.previous(false));
        assert_eq!(slider.selected_index(), Some(0));
        assert!(selects.borrow().is_empty());
        assert!(!slider.is_animating());
    }

    #[test]
    fn test_select_same_index_needs_force() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        let selects = record(&mut slider, SliderEventKind::Select);

        assert!(!slider.select(0, SelectOptions::default()));
        assert!(slider.select(
            0,
            SelectOptions {
                force: true,
                ..Default::default()
            }
        ));
        assert_eq!(*selects.borrow(), vec![SliderEvent::Select { index: 0 }]);
    }

    #[test]
    fn test_select_animates_and_settles_once() {
        let (scheduler, mut slider) = slider(SliderOptions::default(), 4);
        let settles = record(&mut slider, SliderEventKind::Settle);

        assert!(slider.select(3, SelectOptions::default()));
        assert!(slider.is_animating());

        let frames = scheduler.run_while_animating(&mut slider, 2_000);
        assert!(frames < 2_000);
        assert!(!slider.is_animating());
        assert_eq!(slider.x(), -350.0);
        assert_eq!(*settles.borrow(), vec![SliderEvent::Settle { index: 3 }]);
    }

    #[test]
    fn test_long_jump_settles_on_target() {
        let (scheduler, mut slider) = slider(SliderOptions::default(), 30);
        let target = slider.cells()[20].target();

        assert!(slider.select(20, SelectOptions::default()));
        scheduler.run_while_animating(&mut slider, 5_000);

        assert!(!slider.is_animating());
        assert_eq!(slider.x(), -target);
        assert_eq!(slider.slider_offset(), slider.cursor_position() - target);
    }

    #[test]
    fn test_option_wrap_flag_wraps_without_wrap_around() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        assert!(slider.select(-1, SelectOptions::wrapped()));
        assert_eq!(slider.selected_index(), Some(3));
        // No cycle offset without wrapAround
        assert_eq!(slider.x(), -50.0);
    }

    #[test]
    fn test_wrap_around_offsets_position_by_cycle() {
        let options = SliderOptions {
            wrap_around: true,
            ..Default::default()
        };
        let (_scheduler, mut slider) = slider(options, 5);

        assert!(slider.select(-1, SelectOptions::default()));
        assert_eq!(slider.selected_index(), Some(4));
        // Moved back one 500px cycle so the motion continues leftward
        assert_eq!(slider.x(), -50.0 - 500.0);
    }

    #[test]
    fn test_keyboard_navigation_respects_rtl() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        let ui = record(&mut slider, SliderEventKind::UiChange);

        slider.handle_event(HostEvent::Input(InputEvent::Key(Key::ArrowRight.into())));
        assert_eq!(slider.selected_index(), Some(1));
        slider.handle_event(HostEvent::Input(InputEvent::Key(Key::ArrowLeft.into())));
        assert_eq!(slider.selected_index(), Some(0));
        assert_eq!(ui.borrow().len(), 2);

        let options = SliderOptions {
            right_to_left: true,
            ..Default::default()
        };
        let (_scheduler, mut rtl) = self::slider(options, 4);
        rtl.handle_event(HostEvent::Input(InputEvent::Key(Key::ArrowLeft.into())));
        assert_eq!(rtl.selected_index(), Some(1));
    }

    #[test]
    fn test_accessibility_off_ignores_keys() {
        let options = SliderOptions {
            accessibility: false,
            ..Default::default()
        };
        let (_scheduler, mut slider) = slider(options, 4);
        slider.handle_event(HostEvent::Input(InputEvent::Key(Key::ArrowRight.into())));
        assert_eq!(slider.selected_index(), Some(0));
    }

    #[test]
    fn test_rtl_negates_offset() {
        let options = SliderOptions {
            right_to_left: true,
            ..Default::default()
        };
        let (_scheduler, slider) = slider(options, 3);
        // Cell 0 target 50, cursor 150: strip moved left by 100 in LTR terms
        assert_eq!(slider.slider_offset(), -100.0);
        let state = slider.render_state();
        assert_eq!(state.origin, OriginSide::Right);
        assert!(state.next_button.unwrap().is_on_left());
        assert!(!state.prev_button.unwrap().is_on_left());
    }

    #[test]
    fn test_empty_slider_never_animates() {
        let (scheduler, mut slider) = slider(SliderOptions::default(), 0);

        assert_eq!(slider.selected_index(), None);
        assert!(!slider.next(false));
        assert!(!slider.select(0, SelectOptions::default()));
        assert!(!slider.tap_page_dot(0));
        assert_eq!(scheduler.active_ticks(), 0);
    }

    #[test]
    fn test_page_dots_and_buttons_follow_selection() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 3);

        assert_eq!(slider.page_dots().map(PageDots::count), Some(3));
        assert!(!slider.prev_button().unwrap().is_enabled());
        assert!(slider.next_button().unwrap().is_enabled());

        assert!(slider.tap_page_dot(2));
        assert!(slider.page_dots().unwrap().is_selected(2));
        assert!(!slider.next_button().unwrap().is_enabled());
        assert!(!slider.tap_button(Direction::Next));

        assert!(slider.tap_button(Direction::Previous));
        assert_eq!(slider.selected_index(), Some(1));
    }

    #[test]
    fn test_disabled_aux_ui() {
        let options = SliderOptions {
            page_dots: false,
            prev_next_buttons: false,
            ..Default::default()
        };
        let (_scheduler, mut slider) = slider(options, 3);
        assert!(slider.page_dots().is_none());
        assert!(!slider.tap_button(Direction::Next));
        assert!(!slider.tap_page_dot(1));
    }

    #[test]
    fn test_autoplay_advances_and_wraps() {
        let options = SliderOptions {
            auto_play: crate::options::AutoPlay::Millis(1000),
            ..Default::default()
        };
        let (scheduler, mut slider) = slider(options, 3);
        assert!(slider.player().unwrap().is_playing());

        for expected in [1, 2, 0] {
            scheduler.advance(&mut slider, Duration::from_millis(1000));
            scheduler.run_while_animating(&mut slider, 2_000);
            assert_eq!(slider.selected_index(), Some(expected));
        }
    }

    #[test]
    fn test_ui_change_stops_autoplay() {
        let options = SliderOptions {
            auto_play: crate::options::AutoPlay::Toggle(true),
            ..Default::default()
        };
        let (scheduler, mut slider) = slider(options, 3);

        slider.tap_button(Direction::Next);
        assert!(!slider.player().unwrap().is_playing());
        scheduler.run_while_animating(&mut slider, 2_000);
        scheduler.advance(&mut slider, Duration::from_secs(10));
        assert_eq!(slider.selected_index(), Some(1));
    }

    #[test]
    fn test_hover_and_visibility_pause_autoplay() {
        let options = SliderOptions {
            auto_play: crate::options::AutoPlay::Millis(500),
            ..Default::default()
        };
        let (scheduler, mut slider) = slider(options, 3);

        slider.handle_event(HostEvent::PointerEntered);
        slider.handle_event(HostEvent::Visibility(Visibility::Hidden));
        slider.handle_event(HostEvent::PointerLeft);
        scheduler.advance(&mut slider, Duration::from_secs(2));
        assert_eq!(slider.selected_index(), Some(0));

        slider.handle_event(HostEvent::Visibility(Visibility::Visible));
        scheduler.advance(&mut slider, Duration::from_millis(500));
        assert_eq!(slider.selected_index(), Some(1));
    }

    #[test]
    fn test_resize_is_debounced() {
        let (scheduler, mut slider) = slider(SliderOptions::default(), 5);

        slider.handle_event(HostEvent::Resized { width: 400.0 });
        slider.handle_event(HostEvent::Resized { width: 500.0 });
        assert_eq!(slider.viewport_width(), 300.0);
        assert_eq!(scheduler.pending_timers(), 1);

        scheduler.advance(&mut slider, RESIZE_DEBOUNCE);
        assert_eq!(slider.viewport_width(), 500.0);
        assert_eq!(slider.cursor_position(), 250.0);
    }

    #[test]
    fn test_destroy_detaches_listeners() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 3);
        let destroys = record(&mut slider, SliderEventKind::Destroy);
        let deactivates = record(&mut slider, SliderEventKind::Deactivate);

        slider.destroy();
        slider.destroy();

        assert!(slider.is_destroyed());
        assert!(!slider.is_active());
        assert_eq!(destroys.borrow().len(), 1);
        assert_eq!(deactivates.borrow().len(), 1);

        slider.activate(300.0, cells(3, 100.0));
        assert!(!slider.is_active());
    }

    #[test]
    fn test_destroy_releases_scheduler() {
        let options = SliderOptions {
            auto_play: crate::options::AutoPlay::Millis(1000),
            ..Default::default()
        };
        let (scheduler, mut slider) = slider(options, 4);

        slider.select(3, SelectOptions::default());
        slider.handle_event(HostEvent::Resized { width: 400.0 });
        assert!(slider.is_animating());
        assert_eq!(scheduler.active_ticks(), 1);
        assert_eq!(scheduler.pending_timers(), 2);

        slider.destroy();
        assert!(scheduler.is_idle());
        assert!(!slider.is_animating());

        scheduler.advance(&mut slider, Duration::from_secs(3));
        assert_eq!(slider.viewport_width(), 300.0);
        assert_eq!(scheduler.active_ticks(), 0);
    }

    #[test]
    fn test_select_cell_by_element() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        let selects = record(&mut slider, SliderEventKind::Select);

        assert!(slider.select_cell(ElementId(2), SelectOptions::default()));
        assert_eq!(slider.selected_index(), Some(2));
        assert_eq!(slider.selected_element(), Some(ElementId(2)));

        assert!(!slider.select_cell(ElementId(42), SelectOptions::default()));
        assert_eq!(slider.selected_index(), Some(2));
        assert_eq!(*selects.borrow(), vec![SliderEvent::Select { index: 2 }]);
    }

    #[test]
    fn test_breakpoint_toggles_activation() {
        let options = SliderOptions {
            watch_css: WatchCss::On,
            initial_index: 1,
            ..Default::default()
        };
        let scheduler = ManualScheduler::new();
        let mut slider = Slider::new(options, scheduler.handle()).unwrap();
        let activates = record(&mut slider, SliderEventKind::Activate);

        assert!(!slider.watch_breakpoint(None, 300.0, cells(3, 100.0)));
        assert!(!slider.watch_breakpoint(Some(false), 300.0, cells(3, 100.0)));
        assert!(slider.watch_breakpoint(Some(true), 300.0, cells(3, 100.0)));
        assert_eq!(slider.selected_index(), Some(1));

        // Still matching: no second activation
        assert!(slider.watch_breakpoint(Some(true), 300.0, cells(3, 100.0)));
        assert_eq!(activates.borrow().len(), 1);

        assert!(!slider.watch_breakpoint(Some(false), 300.0, Vec::new()));
        assert_eq!(slider.cell_count(), 0);
    }

    #[test]
    fn test_breakpoint_ignored_without_watch_option() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 3);
        assert!(slider.watch_breakpoint(Some(false), 300.0, Vec::new()));
        assert_eq!(slider.cell_count(), 3);

        let options = SliderOptions {
            watch_css: WatchCss::FallbackOn,
            ..Default::default()
        };
        let mut fallback = Slider::new(options, ManualScheduler::new().handle()).unwrap();
        assert!(fallback.watch_breakpoint(None, 300.0, cells(3, 100.0)));
    }

    #[test]
    fn test_reactivation_keeps_selection() {
        let (_scheduler, mut slider) = slider(SliderOptions::default(), 4);
        slider.select(2, SelectOptions::default());
        slider.deactivate();
        assert_eq!(slider.cell_count(), 0);

        slider.activate(300.0, cells(4, 100.0));
        assert_eq!(slider.selected_index(), Some(2));
    }

    #[test]
    fn test_render_state_percent_positions() {
        let (_scheduler, slider) = slider(SliderOptions::default(), 3);
        let state = slider.render_state();

        assert_eq!(state.slider_offset, PositionValue::Percent(33.33));
        assert_eq!(state.cells[1].offset, PositionValue::Percent(33.33));
        assert!(state.cells[0].is_selected);
        assert_eq!(state.gallery_height, Some(100.0));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = SliderOptions {
            friction: 0.0,
            ..Default::default()
        };
        assert!(Slider::new(options, ManualScheduler::new().handle()).is_err());
    }
}
