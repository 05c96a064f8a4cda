//! Glissade Animation System
//!
//! Frame scheduling and the physics used by the slider.
//!
//! # Features
//!
//! - **Scheduler-owned ticking**: targets implement [`Animate`] and return a
//!   [`ControlFlow`] each frame; the scheduler drops them on `Stop`
//! - **One-shot timers**: cancellable timeouts for autoplay and debouncing
//! - **Deterministic clock**: [`ManualScheduler`] advances virtual time in
//!   frame-sized steps, optionally paced in real time
//! - **Integrator**: velocity/acceleration/friction stepping with
//!   consecutive-frame settle detection

pub mod integrator;
pub mod scheduler;

pub use integrator::{Integrator, RESTING_FRAMES, REST_TOLERANCE};
pub use scheduler::{
    Animate, ControlFlow, FrameScheduler, ManualScheduler, SchedulerHandle, TickId, TimerId,
    DEFAULT_FRAME_INTERVAL,
};
