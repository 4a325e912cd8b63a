//! Cooperative, tick-driven tasks.
//!
//! Nothing here owns a thread or a clock. The round controller feeds every
//! task the frame delta from a single external tick source; a paused round
//! simply stops feeding them, so progress is frozen rather than restarted.
//!
//! - [`CancelToken`]: shared flag checked by a task at every resumption
//! - [`Delay`]: fires once after a fixed amount of unpaused time
//! - [`Tween`]: tracks the elapsed fraction of a fixed-length transition

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Cancellation flag shared between a task and whoever scheduled it.
///
/// Cloning yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Create a live (not cancelled) token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the task holding this token.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Has the token been cancelled?
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Result of advancing a [`Delay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayStatus {
    /// Still waiting.
    Pending,
    /// The delay ran out on this advance.
    Elapsed,
    /// The token was cancelled before the delay ran out.
    Cancelled,
}

/// One-shot delay measured in unpaused time.
#[derive(Clone, Debug)]
pub struct Delay {
    remaining: Duration,
    token: CancelToken,
}

impl Delay {
    /// Create a delay with a fresh token.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: delay,
            token: CancelToken::new(),
        }
    }

    /// Handle that cancels this delay.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Time left before the delay fires.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance by `dt`.
    ///
    /// A zero-length delay elapses on its first advance, even with `dt == 0`.
    pub fn advance(&mut self, dt: Duration) -> DelayStatus {
        if self.token.is_cancelled() {
            return DelayStatus::Cancelled;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            DelayStatus::Elapsed
        } else {
            DelayStatus::Pending
        }
    }
}

/// Fixed-length transition with a retained elapsed fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// Start a transition of the given length.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Advance by `dt`. Returns `true` once the transition is complete.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_complete()
    }

    /// Has the transition run its full length?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Elapsed fraction in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_delay_elapses() {
        let mut delay = Delay::new(Duration::from_millis(120));
        assert_eq!(delay.advance(MS_50), DelayStatus::Pending);
        assert_eq!(delay.advance(MS_50), DelayStatus::Pending);
        assert_eq!(delay.remaining(), Duration::from_millis(20));
        assert_eq!(delay.advance(MS_50), DelayStatus::Elapsed);
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let mut delay = Delay::new(Duration::ZERO);
        assert_eq!(delay.advance(Duration::ZERO), DelayStatus::Elapsed);
    }

    #[test]
    fn test_cancelled_delay_never_fires() {
        let mut delay = Delay::new(MS_50);
        delay.token().cancel();
        assert_eq!(delay.advance(Duration::from_secs(1)), DelayStatus::Cancelled);
    }

    #[test]
    fn test_tween_fraction() {
        let mut tween = Tween::new(Duration::from_millis(200));
        assert_eq!(tween.fraction(), 0.0);

        assert!(!tween.advance(MS_50));
        assert!((tween.fraction() - 0.25).abs() < 1e-6);

        assert!(tween.advance(Duration::from_secs(1)));
        assert_eq!(tween.fraction(), 1.0);
    }

    #[test]
    fn test_zero_length_tween_is_complete() {
        let tween = Tween::new(Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.fraction(), 1.0);
    }
}
