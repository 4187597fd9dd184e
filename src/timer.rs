//! Timer facility abstraction and a deterministic timer queue.
//!
//! The input controller never sleeps or spawns timers itself. It asks a
//! [`TimerFacility`] to schedule callbacks and the host delivers each fired
//! timer back through `KeyboardController::on_timer`, one at a time, on the
//! same thread that delivers UI events.

use std::time::Duration;
use tracing::trace;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wraps a raw identifier (for hosts with their own timer ids).
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Schedules one-shot and repeating timers on behalf of the controller.
///
/// Cancellation must be idempotent: cancelling a timer that already fired or
/// was already cancelled is a no-op.
pub trait TimerFacility {
    /// Schedules a timer that fires once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Schedules a timer that fires every `interval` until cancelled.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancels a timer.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledTimer {
    id: TimerId,
    due: Duration,
    interval: Option<Duration>,
}

/// Timer queue driven by an explicit clock.
///
/// Time only moves when the owner calls [`TimerQueue::pop_due`] or
/// [`TimerQueue::advance_to`]. Tests use it as a simulated clock; the
/// interactive host feeds it wall-clock elapsed time.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    timers: Vec<ScheduledTimer>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// True if the timer is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Due time of the earliest live timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Fires the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are
    /// rescheduled one interval later; one-shot timers are removed. Returns
    /// `None` when nothing is due, leaving the clock untouched.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(index, _)| index)?;

        let ScheduledTimer { id, due, interval } = self.timers[index].clone();
        self.now = self.now.max(due);

        match interval {
            Some(interval) => self.timers[index].due = due + interval,
            None => {
                self.timers.remove(index);
            }
        }

        trace!(timer = id.raw(), now_ms = self.now.as_millis(), "timer fired");
        Some(id)
    }

    /// Moves the clock forward to `until` without firing anything.
    ///
    /// Call [`TimerQueue::pop_due`] first if due timers should fire.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn schedule(&mut self, delay: Duration, interval: Option<Duration>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(ScheduledTimer {
            id,
            due: self.now + delay,
            interval,
        });
        id
    }
}

impl TimerFacility for TimerQueue {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        // A zero interval would fire forever at the same instant
        let interval = interval.max(Duration::from_millis(1));
        self.schedule(interval, Some(interval))
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
