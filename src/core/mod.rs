//! Core engine types: slot IDs, configuration, errors, RNG, cooperative tasks.
//!
//! Everything above this layer (cards, board, timer, round) builds on these
//! and never reaches for a global.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod task;

pub use config::{EngineConfig, ScoreConfig};
pub use entity::CardSlot;
pub use error::{PairsError, Result};
pub use rng::BoardRng;
pub use task::{CancelToken, Delay, DelayStatus, Tween};
