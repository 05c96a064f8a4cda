//! Frame scheduler
//!
//! Widgets never schedule themselves recursively. Instead they register a
//! tick with a [`FrameScheduler`] and implement [`Animate`]; the scheduler
//! calls `animate()` once per display frame and drops the registration when
//! the target answers [`ControlFlow::Stop`]. One-shot timers are delivered the
//! same way through `fire_timer()`.
//!
//! The scheduler itself never holds a reference to the widget. The host (or a
//! test) owns both and passes the widget into [`ManualScheduler::frame`]:
//!
//! ```ignore
//! let scheduler = ManualScheduler::new();
//! let mut slider = Slider::new(options, scheduler.handle())?;
//! slider.select(3, SelectOptions::default());
//! scheduler.run_while_animating(&mut slider, 1_000);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Display refresh interval used by default (60Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

new_key_type! {
    /// Handle to a frame tick registration
    pub struct TickId;
    /// Handle to a pending one-shot timer
    pub struct TimerId;
}

/// Whether a ticking target wants another frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep ticking on the next frame
    #[default]
    Continue,
    /// Drop the tick registration
    Stop,
}

/// Scheduling capability handed to widgets
///
/// All methods take `&self`: handles are cheap shared references into the
/// host's scheduler and are called from inside frame and timer callbacks.
pub trait FrameScheduler {
    /// Current host time
    fn now(&self) -> Duration;

    /// Register for per-frame `animate()` calls
    ///
    /// Returns None if the scheduler is gone.
    fn start_ticking(&self) -> Option<TickId>;

    /// Cancel a tick registration. Idempotent.
    fn stop_ticking(&self, id: TickId);

    /// Arm a one-shot timer
    fn set_timeout(&self, delay: Duration) -> Option<TimerId>;

    /// Cancel a pending timer. Idempotent.
    fn clear_timeout(&self, id: TimerId);
}

/// A target driven by a scheduler
pub trait Animate {
    /// Advance one frame for the given tick registration
    fn animate(&mut self, tick: TickId, now: Duration) -> ControlFlow;

    /// A timer armed through the scheduler has expired
    fn fire_timer(&mut self, timer: TimerId, now: Duration);
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    deadline: Duration,
    /// Arm order, breaks deadline ties
    seq: u64,
}

/// Internal state of the scheduler
struct SchedulerInner {
    now: Duration,
    frame_interval: Duration,
    ticks: SlotMap<TickId, ()>,
    timers: SlotMap<TimerId, PendingTimer>,
    next_seq: u64,
}

impl SchedulerInner {
    /// Remove and return the earliest timer due at or before `until`
    fn pop_due_timer(&mut self, until: Duration) -> Option<(TimerId, Duration)> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, t)| (id, *t))?;
        self.timers.remove(id);
        Some((id, timer.deadline))
    }
}

/// Deterministic scheduler with a virtual clock
///
/// Time only moves when [`frame`](Self::frame) (or one of the run helpers)
/// is called, which makes physics and autoplay reproducible in tests. With
/// real-time pacing enabled each frame also sleeps until its wall-clock slot.
pub struct ManualScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
    realtime: bool,
    last_wall: RefCell<Option<Instant>>,
}

impl ManualScheduler {
    /// Create a 60Hz scheduler starting at time zero
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Create a scheduler with a custom frame interval
    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                frame_interval,
                ticks: SlotMap::with_key(),
                timers: SlotMap::with_key(),
                next_seq: 0,
            })),
            realtime: false,
            last_wall: RefCell::new(None),
        }
    }

    /// Pace frames against the wall clock
    pub fn set_realtime(&mut self, realtime: bool) {
        self.realtime = realtime;
    }

    /// Get a handle to this scheduler for passing to widgets
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn frame_interval(&self) -> Duration {
        self.inner.borrow().frame_interval
    }

    /// Number of live tick registrations
    pub fn active_ticks(&self) -> usize {
        self.inner.borrow().ticks.len()
    }

    /// Number of armed timers
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Deadline of the earliest armed timer
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .timers
            .values()
            .map(|t| t.deadline)
            .min()
    }

    /// Check if nothing is ticking and no timer is armed
    pub fn is_idle(&self) -> bool {
        let inner = self.inner.borrow();
        inner.ticks.is_empty() && inner.timers.is_empty()
    }

    /// Advance the clock by one frame
    ///
    /// Timers due within the frame fire first, each at its own deadline,
    /// then every live tick is animated at the frame time. Returns true if
    /// any tick is still registered afterwards.
    pub fn frame<T: Animate + ?Sized>(&self, target: &mut T) -> bool {
        if self.realtime {
            self.pace();
        }

        let frame_time = {
            let inner = self.inner.borrow();
            inner.now + inner.frame_interval
        };

        // Borrow is released before each callback so targets can re-arm
        loop {
            let due = self.inner.borrow_mut().pop_due_timer(frame_time);
            let Some((id, deadline)) = due else {
                break;
            };
            self.inner.borrow_mut().now = deadline;
            target.fire_timer(id, deadline);
        }

        self.inner.borrow_mut().now = frame_time;

        let ticks: SmallVec<[TickId; 4]> = self.inner.borrow().ticks.keys().collect();
        for id in ticks {
            if !self.inner.borrow().ticks.contains_key(id) {
                continue;
            }
            if target.animate(id, frame_time) == ControlFlow::Stop {
                self.inner.borrow_mut().ticks.remove(id);
            }
        }

        !self.inner.borrow().ticks.is_empty()
    }

    /// Run frames until at least `duration` of virtual time has passed
    ///
    /// Returns the number of frames run.
    pub fn advance<T: Animate + ?Sized>(&self, target: &mut T, duration: Duration) -> usize {
        let until = self.now() + duration;
        let mut frames = 0;
        while self.now() < until {
            self.frame(target);
            frames += 1;
        }
        frames
    }

    /// Run frames while any tick is registered, up to `max_frames`
    ///
    /// Pending timers fire along the way but do not keep the loop alive.
    pub fn run_while_animating<T: Animate + ?Sized>(&self, target: &mut T, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.active_ticks() > 0 && frames < max_frames {
            self.frame(target);
            frames += 1;
        }
        if frames == max_frames && self.active_ticks() > 0 {
            tracing::warn!(
                "ManualScheduler: still animating after {} frames",
                max_frames
            );
        }
        frames
    }

    /// Run frames until no tick or timer remains, up to `max_frames`
    pub fn run_until_idle<T: Animate + ?Sized>(&self, target: &mut T, max_frames: usize) -> usize {
        let mut frames = 0;
        while !self.is_idle() && frames < max_frames {
            self.frame(target);
            frames += 1;
        }
        frames
    }

    fn pace(&self) {
        let frame_interval = self.frame_interval();
        let mut last_wall = self.last_wall.borrow_mut();
        if let Some(last) = *last_wall {
            let elapsed = last.elapsed();
            if elapsed < frame_interval {
                thread::sleep(frame_interval - elapsed);
            }
        }
        *last_wall = Some(Instant::now());
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("ticks", &inner.ticks.len())
            .field("timers", &inner.timers.len())
            .field("realtime", &self.realtime)
            .finish()
    }
}

/// Handle to a [`ManualScheduler`] for passing to widgets
///
/// Holds a weak reference: once the scheduler is dropped every operation
/// becomes a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl FrameScheduler for SchedulerHandle {
    fn now(&self) -> Duration {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().now)
            .unwrap_or_default()
    }

    fn start_ticking(&self) -> Option<TickId> {
        let inner = self.inner.upgrade()?;
        let id = inner.borrow_mut().ticks.insert(());
        Some(id)
    }

    fn stop_ticking(&self, id: TickId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().ticks.remove(id);
        }
    }

    fn set_timeout(&self, delay: Duration) -> Option<TimerId> {
        let inner = self.inner.upgrade()?;
        let mut inner = inner.borrow_mut();
        let deadline = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        Some(inner.timers.insert(PendingTimer { deadline, seq }))
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().timers.remove(id);
        }
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
