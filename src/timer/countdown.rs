//! Round countdown.
//!
//! The timer stores a target end time on the engine clock instead of
//! decrementing a counter each tick, so irregular frame intervals never
//! accumulate drift. Pausing records when the pause began; resuming pushes
//! the target end forward by the paused span.

use std::time::Duration;

/// Outcome of a countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// Not running, or paused.
    Idle,
    /// Still counting down.
    Running { remaining: u32 },
    /// Reached zero on this tick. Reported once.
    Expired,
}

/// Pause-aware, drift-corrected countdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    target_end: Option<Duration>,
    paused_at: Option<Duration>,
    remaining: u32,
    expired: bool,
}

impl CountdownTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting `total_seconds` down from `now`.
    pub fn start(&mut self, total_seconds: u32, now: Duration) {
        self.target_end = Some(now + Duration::from_secs(total_seconds.into()));
        self.paused_at = None;
        self.remaining = total_seconds;
        self.expired = false;
    }

    /// Recompute the remaining whole seconds at `now`.
    pub fn tick(&mut self, now: Duration) -> TimerTick {
        let Some(target) = self.target_end else {
            return TimerTick::Idle;
        };
        if self.paused_at.is_some() {
            return TimerTick::Idle;
        }

        self.remaining = seconds_until(target, now);
        if self.remaining == 0 {
            self.target_end = None;
            self.expired = true;
            return TimerTick::Expired;
        }
        TimerTick::Running {
            remaining: self.remaining,
        }
    }

    /// Freeze the countdown at `now`.
    pub fn pause(&mut self, now: Duration) {
        if self.target_end.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze the countdown, discounting the time spent paused.
    pub fn resume(&mut self, now: Duration) {
        if let Some(paused_at) = self.paused_at.take() {
            if let Some(target) = self.target_end.as_mut() {
                *target += now.saturating_sub(paused_at);
            }
        }
    }

    /// Stop the countdown and return the seconds left.
    pub fn stop(&mut self, now: Duration) -> u32 {
        if let Some(target) = self.target_end.take() {
            let at = self.paused_at.take().unwrap_or(now);
            self.remaining = seconds_until(target, at);
        }
        self.remaining
    }

    /// Back to idle with nothing on the clock.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Seconds left at `now` without advancing the countdown.
    #[must_use]
    pub fn peek(&self, now: Duration) -> u32 {
        match self.target_end {
            Some(target) => seconds_until(target, self.paused_at.unwrap_or(now)),
            None => self.remaining,
        }
    }

    /// Seconds left as of the last tick, stop or start.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.target_end.is_some()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

/// Whole seconds from `now` to `target`, rounded up.
fn seconds_until(target: Duration, now: Duration) -> u32 {
    let millis = target.saturating_sub(now).as_millis();
    let seconds = millis.div_ceil(1000);
    u32::try_from(seconds).unwrap_or(u32::MAX)
}
