//! Headless scenario runner
//!
//! Drives a slider with a virtual-clock scheduler, translating scripted
//! steps into host events and recording every notification.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use glissade_animation::{FrameScheduler, ManualScheduler};
use glissade_core::ElementId;
use glissade_platform::{
    HostEvent, InputEvent, Key, KeyboardEvent, Pointer, PointerKind, Visibility,
};
use glissade_slider::{
    Cell, CellSize, RenderState, SelectOptions, Slider, SliderEvent, SliderEventKind,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{DragStep, ScenarioConfig, Step, DEFAULT_MAX_FRAMES};

/// Vertical page position used for scripted pointers
const POINTER_Y: f32 = 100.0;

/// A notification observed while running
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub time_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Slider state after a step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub step: usize,
    pub action: &'static str,
    pub time_ms: u64,
    pub selected_index: Option<usize>,
    pub x: f32,
    pub is_animating: bool,
}

/// Everything a run produced
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub name: String,
    pub frames: usize,
    pub steps: Vec<StepRecord>,
    pub events: Vec<EventRecord>,
    pub final_state: RenderState,
}

impl ScenarioReport {
    /// Number of recorded notifications of a kind
    pub fn count(&self, kind: SliderEventKind) -> usize {
        self.events
            .iter()
            .filter(|record| record.event == kind.name())
            .count()
    }
}

pub struct ScenarioRunner {
    name: String,
    scheduler: ManualScheduler,
    slider: Slider,
    events: Rc<RefCell<Vec<EventRecord>>>,
    insert_size: Option<CellSize>,
    next_element: u64,
    frames: usize,
}

impl ScenarioRunner {
    /// Build the slider described by a scenario and activate it
    pub fn new(config: &ScenarioConfig, realtime: bool) -> Result<Self> {
        config.validate()?;

        let mut scheduler = ManualScheduler::new();
        scheduler.set_realtime(realtime);
        let mut slider =
            Slider::new(config.slider.clone(), scheduler.handle()).context("Invalid slider")?;

        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in SliderEventKind::ALL {
            let sink = events.clone();
            let clock = scheduler.handle();
            slider.on(kind, move |event: &SliderEvent| {
                sink.borrow_mut().push(EventRecord {
                    time_ms: clock.now().as_millis() as u64,
                    event: kind.name(),
                    detail: describe(event),
                });
            });
        }

        let cells = config.cells.build()?;
        let next_element = cells.len() as u64;
        slider.activate(config.scenario.viewport, cells);

        Ok(Self {
            name: config.scenario.name.clone(),
            scheduler,
            slider,
            events,
            insert_size: config.cells.uniform_size().ok(),
            next_element,
            frames: 0,
        })
    }

    /// Run every step, then let the slider come to rest
    pub fn run(mut self, steps: &[Step]) -> Result<ScenarioReport> {
        let mut records = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("Step {} ({}) failed", i + 1, step.action()))?;
            records.push(StepRecord {
                step: i + 1,
                action: step.action(),
                time_ms: self.now_ms(),
                selected_index: self.slider.selected_index(),
                x: self.slider.x(),
                is_animating: self.slider.is_animating(),
            });
        }

        self.settle(DEFAULT_MAX_FRAMES);
        debug!("Scenario '{}' finished after {} frames", self.name, self.frames);

        let events = self.events.borrow().clone();
        Ok(ScenarioReport {
            name: self.name,
            frames: self.frames,
            steps: records,
            events,
            final_state: self.slider.render_state(),
        })
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        debug!("Scenario step: {:?}", step);
        match step {
            Step::Select {
                index,
                wrap,
                instant,
            } => {
                let options = SelectOptions {
                    wrap: *wrap,
                    instant: *instant,
                    ..Default::default()
                };
                self.slider.select(*index, options);
            }
            Step::Next { wrap } => {
                self.slider.next(*wrap);
            }
            Step::Previous { wrap } => {
                self.slider.previous(*wrap);
            }
            Step::Drag(drag) => self.drag(drag),
            Step::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Step::Settle { max_frames } => self.settle(*max_frames),
            Step::Insert { at, count } => self.insert(*at, *count)?,
            Step::Remove { indices } => self.remove(indices),
            Step::Resize { width } => {
                self.slider.handle_event(HostEvent::Resized { width: *width });
            }
            Step::Click { index } => self.click(*index)?,
            Step::Key { key } => {
                self.input(InputEvent::Key(KeyboardEvent::from(Key::from(*key))));
            }
            Step::Hover { inside } => {
                let event = if *inside {
                    HostEvent::PointerEntered
                } else {
                    HostEvent::PointerLeft
                };
                self.slider.handle_event(event);
            }
            Step::Visibility { hidden } => {
                let visibility = if *hidden {
                    Visibility::Hidden
                } else {
                    Visibility::Visible
                };
                self.slider.handle_event(HostEvent::Visibility(visibility));
            }
            Step::Dot { index } => {
                if !self.slider.tap_page_dot(*index) {
                    warn!("Page dot {} is not available", index);
                }
            }
            Step::Button { direction } => {
                if !self.slider.tap_button(*direction) {
                    warn!("The {:?} button is disabled", direction);
                }
            }
        }
        Ok(())
    }

    fn drag(&mut self, drag: &DragStep) {
        let start_x = drag
            .start_x
            .unwrap_or(self.slider.viewport_width() / 2.0);
        let moves = drag.moves.max(1);
        let slice = Duration::from_millis(drag.duration_ms) / moves;

        let down = self.pointer(drag.kind, start_x, POINTER_Y);
        self.input(InputEvent::PointerDown(down));
        for i in 1..=moves {
            self.wait(slice);
            let progress = i as f32 / moves as f32;
            let sample = self.pointer(
                drag.kind,
                start_x + drag.dx * progress,
                POINTER_Y + drag.dy * progress,
            );
            self.input(InputEvent::PointerMove(sample));
        }

        let end = self.pointer(drag.kind, start_x + drag.dx, POINTER_Y + drag.dy);
        if drag.cancel {
            self.input(InputEvent::PointerCancel(end));
        } else {
            self.input(InputEvent::PointerUp(end));
            self.input(InputEvent::Click { target: None });
        }
    }

    fn click(&mut self, index: usize) -> Result<()> {
        let element = self
            .slider
            .cells()
            .get(index)
            .map(|cell| cell.element())
            .with_context(|| format!("No cell at index {}", index))?;
        let x = self.slider.viewport_width() / 2.0;

        let down = self.pointer(PointerKind::Mouse, x, POINTER_Y).on(element);
        self.input(InputEvent::PointerDown(down.clone()));
        self.input(InputEvent::PointerUp(down));
        self.input(InputEvent::Click {
            target: Some(element),
        });
        Ok(())
    }

    fn insert(&mut self, at: Option<usize>, count: usize) -> Result<()> {
        let size = self
            .insert_size
            .context("Inserted cells need a valid [cells] width and height")?;
        let cells = (0..count)
            .map(|_| {
                let element = ElementId(self.next_element);
                self.next_element += 1;
                Cell::new(element, size)
            })
            .collect();
        match at {
            Some(at) => self.slider.insert(cells, at),
            None => self.slider.append(cells),
        }
        Ok(())
    }

    fn remove(&mut self, indices: &[usize]) {
        let elements: Vec<ElementId> = indices
            .iter()
            .filter_map(|&index| {
                let element = self.slider.cells().get(index).map(|cell| cell.element());
                if element.is_none() {
                    warn!("No cell at index {} to remove", index);
                }
                element
            })
            .collect();
        self.slider.remove(&elements);
    }

    fn wait(&mut self, duration: Duration) {
        self.frames += self.scheduler.advance(&mut self.slider, duration);
    }

    fn settle(&mut self, max_frames: usize) {
        self.frames += self
            .scheduler
            .run_while_animating(&mut self.slider, max_frames);
    }

    fn input(&mut self, event: InputEvent) {
        self.slider.handle_event(HostEvent::Input(event));
    }

    fn pointer(&self, kind: PointerKind, x: f32, y: f32) -> Pointer {
        let pointer = match kind {
            PointerKind::Mouse => Pointer::mouse(x, y),
            kind => Pointer {
                kind,
                ..Pointer::touch(1, x, y)
            },
        };
        pointer.at(self.scheduler.now())
    }

    fn now_ms(&self) -> u64 {
        self.scheduler.now().as_millis() as u64
    }
}

/// Short human-readable payload of a notification
fn describe(event: &SliderEvent) -> Option<String> {
    match event {
        SliderEvent::Select { index } | SliderEvent::Settle { index } => {
            Some(format!("index={}", index))
        }
        SliderEvent::PointerDown { pointer }
        | SliderEvent::PointerUp { pointer }
        | SliderEvent::DragStart { pointer }
        | SliderEvent::DragEnd { pointer } => Some(format!("x={:.1}", pointer.x)),
        SliderEvent::DragMove {
            delta_x, delta_y, ..
        } => Some(format!("dx={:.1} dy={:.1}", delta_x, delta_y)),
        SliderEvent::StaticClick { index, .. } => {
            index.map(|index| format!("index={}", index))
        }
        SliderEvent::CellAddedRemoved {
            index,
            selected_shift,
        } => Some(format!("index={} shift={}", index, selected_shift)),
        SliderEvent::Activate
        | SliderEvent::Deactivate
        | SliderEvent::UiChange
        | SliderEvent::Destroy => None,
    }
}
