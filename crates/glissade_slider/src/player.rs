//! Autoplay player
//!
//! A one-shot timer advances the slider. The timer is armed on play and on
//! resume, and re-armed by the slider after every settle. Pause reasons are
//! tracked independently so a hover ending does not resume a player that is
//! still paused because the page is hidden.

use std::time::Duration;

use glissade_animation::{FrameScheduler, TimerId};
use smallvec::SmallVec;

/// Player state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
}

/// Why autoplay is temporarily held
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// Mouse is over the slider
    Hover,
    /// Page is not visible
    Hidden,
    /// A pointer is pressed on the slider
    Interaction,
    /// Paused through the host API
    Host,
}

/// Autoplay timer state
#[derive(Debug)]
pub struct Player {
    state: PlayerState,
    interval: Duration,
    pauses: SmallVec<[PauseReason; 4]>,
    timer: Option<TimerId>,
}

impl Player {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PlayerState::Stopped,
            interval,
            pauses: SmallVec::new(),
            timer: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn is_paused(&self) -> bool {
        !self.pauses.is_empty()
    }

    pub fn is_paused_by(&self, reason: PauseReason) -> bool {
        self.pauses.contains(&reason)
    }

    /// Check if the advance timer is armed
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub(crate) fn play(&mut self, scheduler: &dyn FrameScheduler) {
        self.state = PlayerState::Playing;
        self.pauses.clear();
        self.arm(scheduler);
    }

    pub(crate) fn stop(&mut self, scheduler: &dyn FrameScheduler) {
        self.state = PlayerState::Stopped;
        self.pauses.clear();
        self.disarm(scheduler);
    }

    pub(crate) fn pause(&mut self, reason: PauseReason, scheduler: &dyn FrameScheduler) {
        if !self.is_playing() || self.pauses.contains(&reason) {
            return;
        }
        self.pauses.push(reason);
        self.disarm(scheduler);
    }

    pub(crate) fn unpause(&mut self, reason: PauseReason, scheduler: &dyn FrameScheduler) {
        let before = self.pauses.len();
        self.pauses.retain(|existing| *existing != reason);
        if self.pauses.len() != before && self.pauses.is_empty() {
            self.arm(scheduler);
        }
    }

    /// Restart the timer for a full interval if playing and not paused
    pub(crate) fn arm(&mut self, scheduler: &dyn FrameScheduler) {
        if !self.is_playing() || self.is_paused() {
            return;
        }
        self.disarm(scheduler);
        self.timer = scheduler.set_timeout(self.interval);
    }

    fn disarm(&mut self, scheduler: &dyn FrameScheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.clear_timeout(timer);
        }
    }

    /// Consume an expired timer
    ///
    /// Returns true if it was the player's timer and the slider should
    /// advance.
    pub(crate) fn timer_fired(&mut self, timer: TimerId) -> bool {
        if self.timer != Some(timer) {
            return false;
        }
        self.timer = None;
        self.is_playing() && !self.is_paused()
    }
}
