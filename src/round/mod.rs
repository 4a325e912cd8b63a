//! Round flow: selection resolution, hazards, win and game-over.
//!
//! ## Key Types
//!
//! - `RoundController`: Owns board, timer and score; the engine's entry point
//! - `Round`: Per-round counters and the selection buffer
//! - `RoundOutcome` / `GameOverReason`: How a round stands or ended
//! - `PresetReport`: Result of starting a `;`-separated level preset

pub mod controller;
pub mod preset;
pub mod state;

pub use controller::RoundController;
pub use preset::{parse_preset, PresetReport};
pub use state::{GameOverReason, Round, RoundOutcome};
