//! Backspace hold-to-repeat timing.

use crate::timer::{TimerFacility, TimerId};
use std::time::Duration;
use tracing::debug;

/// Time from pressing backspace to the first repeated delete.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Time between repeated deletes.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(70);

/// Where the repeater is in a backspace hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspacePhase {
    /// Backspace is not held
    Idle,
    /// Waiting for the initial delay before repeating
    Delaying,
    /// Deleting on every repeat tick
    Repeating,
}

/// What the controller should do with a fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspaceTick {
    /// The timer does not belong to the repeater
    Ignored,
    /// The initial delay elapsed and repeating started
    RepeatStarted,
    /// Delete one character
    Delete,
}

/// Repeat-with-initial-delay controller for a held backspace key.
///
/// At most one timer is live at a time: the delay timer is replaced by the
/// repeat timer when it fires.
#[derive(Debug, Clone)]
pub struct BackspaceRepeater {
    initial_delay: Duration,
    repeat_interval: Duration,
    delay_timer: Option<TimerId>,
    repeat_timer: Option<TimerId>,
}

impl BackspaceRepeater {
    /// Creates a repeater with the given timing.
    ///
    /// The first repeated delete lands `initial_delay` after the press, so
    /// `initial_delay` shorter than `repeat_interval` starts repeating
    /// immediately.
    #[must_use]
    pub const fn new(initial_delay: Duration, repeat_interval: Duration) -> Self {
        Self {
            initial_delay,
            repeat_interval,
            delay_timer: None,
            repeat_timer: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> BackspacePhase {
        match (self.delay_timer, self.repeat_timer) {
            (_, Some(_)) => BackspacePhase::Repeating,
            (Some(_), None) => BackspacePhase::Delaying,
            (None, None) => BackspacePhase::Idle,
        }
    }

    /// True while backspace is held.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.delay_timer.is_some() || self.repeat_timer.is_some()
    }

    /// Starts a hold. The caller performs the immediate delete.
    ///
    /// Any timers left from a previous hold are cancelled first, so a rapid
    /// re-press can never leave a stray repeat running.
    pub fn press(&mut self, timers: &mut dyn TimerFacility) {
        self.cancel(timers);
        let delay = self.initial_delay.saturating_sub(self.repeat_interval);
        self.delay_timer = Some(timers.schedule_once(delay));
        debug!(delay_ms = delay.as_millis(), "backspace delay started");
    }

    /// Ends a hold (release, drag out, touch cancel).
    pub fn release(&mut self, timers: &mut dyn TimerFacility) {
        self.cancel(timers);
    }

    /// Cancels all timers. Safe to call when idle.
    pub fn cancel(&mut self, timers: &mut dyn TimerFacility) {
        if let Some(id) = self.delay_timer.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.repeat_timer.take() {
            timers.cancel(id);
        }
    }

    /// Handles a fired timer.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut dyn TimerFacility) -> BackspaceTick {
        if self.delay_timer == Some(id) {
            self.delay_timer = None;
            self.repeat_timer = Some(timers.schedule_repeating(self.repeat_interval));
            debug!("backspace repeat started");
            return BackspaceTick::RepeatStarted;
        }

        if self.repeat_timer == Some(id) {
            return BackspaceTick::Delete;
        }

        BackspaceTick::Ignored
    }
}

impl Default for BackspaceRepeater {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY, DEFAULT_REPEAT_INTERVAL)
    }
}
