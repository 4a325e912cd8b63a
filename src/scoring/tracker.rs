//! Score accrual.

use serde::{Deserialize, Serialize};

use crate::core::ScoreConfig;

/// Running score for the current session.
///
/// Only grows, except through [`ScoreTracker::set_score`] and
/// [`ScoreTracker::reset`].
///
/// ```
/// use rust_pairs::core::ScoreConfig;
/// use rust_pairs::scoring::ScoreTracker;
///
/// let mut score = ScoreTracker::new(ScoreConfig::default());
/// assert_eq!(score.on_match(1), 20);
/// assert_eq!(score.on_match(2), 30);
/// assert_eq!(score.on_round_win(12), 120);
/// assert_eq!(score.score(), 170);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    config: ScoreConfig,
    score: u32,
}

impl ScoreTracker {
    #[must_use]
    pub fn new(config: ScoreConfig) -> Self {
        Self { config, score: 0 }
    }

    /// Award a match made on the given streak. Returns the points awarded.
    pub fn on_match(&mut self, streak: u32) -> u32 {
        let points = self
            .config
            .base
            .saturating_add(self.config.streak_multiplier.saturating_mul(streak));
        self.score = self.score.saturating_add(points);
        points
    }

    /// Award the end-of-round bonus for the seconds left. Returns the points awarded.
    pub fn on_round_win(&mut self, time_left: u32) -> u32 {
        let points = time_left.saturating_mul(self.config.time_bonus);
        self.score = self.score.saturating_add(points);
        points
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_uses_streak() {
        let mut tracker = ScoreTracker::new(ScoreConfig {
            base: 5,
            streak_multiplier: 3,
            time_bonus: 1,
        });
        assert_eq!(tracker.on_match(1), 8);
        assert_eq!(tracker.on_match(4), 17);
        assert_eq!(tracker.score(), 25);
    }

    #[test]
    fn test_round_win_bonus() {
        let mut tracker = ScoreTracker::new(ScoreConfig::default());
        assert_eq!(tracker.on_round_win(0), 0);
        assert_eq!(tracker.on_round_win(7), 70);
        assert_eq!(tracker.score(), 70);
    }

    #[test]
    fn test_set_and_reset() {
        let mut tracker = ScoreTracker::new(ScoreConfig::default());
        tracker.set_score(999);
        assert_eq!(tracker.score(), 999);
        tracker.reset();
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let mut tracker = ScoreTracker::new(ScoreConfig::default());
        tracker.set_score(u32::MAX - 1);
        tracker.on_match(3);
        assert_eq!(tracker.score(), u32::MAX);
    }
}
