//! Round countdown timing.

pub mod countdown;

pub use countdown::{CountdownTimer, TimerTick};
