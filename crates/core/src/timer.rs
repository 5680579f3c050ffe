//! Tick scheduling.
//!
//! The session never owns a clock. Operations that change the gravity period
//! return a [`TimerCommand`] and whoever drives the game applies it to its
//! scheduler. [`IntervalTimer`] is a cooperative scheduler for loops that
//! already measure elapsed time.

use std::time::Duration;

/// What the tick scheduler should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// (Re)start ticking with this period, counting from zero
    Arm(Duration),
    /// Stop ticking; nothing already pending may fire
    Disarm,
}

impl TimerCommand {
    pub fn apply_to<S: Scheduler + ?Sized>(self, scheduler: &mut S) {
        match self {
            TimerCommand::Arm(period) => scheduler.arm(period),
            TimerCommand::Disarm => scheduler.disarm(),
        }
    }
}

/// A periodic tick source that can be re-armed and disarmed
pub trait Scheduler {
    fn arm(&mut self, period: Duration);
    fn disarm(&mut self);
}

/// Elapsed-time driven scheduler.
///
/// Call [`poll`](IntervalTimer::poll) with the time since the last call; it
/// reports one due tick at a time and keeps the remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Option<Duration>,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    /// Time left until the next tick, if armed
    pub fn remaining(&self) -> Option<Duration> {
        self.period.map(|p| p.saturating_sub(self.elapsed))
    }

    /// Account for `elapsed` time and report whether a tick is due.
    ///
    /// At most one tick is reported per call; a backlog drains over
    /// subsequent calls with `Duration::ZERO`.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        let Some(period) = self.period else {
            return false;
        };
        self.elapsed += elapsed;
        if self.elapsed >= period {
            self.elapsed -= period;
            true
        } else {
            false
        }
    }
}

impl Scheduler for IntervalTimer {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.elapsed = Duration::ZERO;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.elapsed = Duration::ZERO;
    }
}
