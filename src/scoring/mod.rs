//! Scoring: streak-based match points and the end-of-round time bonus.

pub mod tracker;

pub use tracker::ScoreTracker;
