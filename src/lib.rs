//! # rust-pairs
//!
//! A pairs-matching ("memory") card game engine.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The engine owns no threads and reads no wall clock.
//!    A host feeds taps through `flip_card` and elapsed time through `tick`.
//!
//! 2. **No Globals**: Audio, menus and image loading are injected once as
//!    `Services`. Tests swap in recording doubles.
//!
//! 3. **Pooled Entities**: Card entities are allocated up front and recycled
//!    round after round; only their per-round data changes.
//!
//! ## Architecture
//!
//! - **Cooperative Tasks**: Flip transitions and flip-back delays are small
//!   tick-driven tasks with cancellation tokens, frozen while paused.
//!
//! - **Drift-Free Countdown**: Remaining time is derived from a target end
//!   time on the engine clock rather than decremented per tick.
//!
//! - **Deterministic Boards**: Pair keys and shuffles come from a seeded
//!   ChaCha RNG, so a seed reproduces a board exactly.
//!
//! ## Modules
//!
//! - `core`: Slot IDs, configuration, errors, RNG, cooperative tasks
//! - `cards`: Card data and the flip state machine
//! - `board`: Grid sizes and the card entity pool
//! - `timer`: Round countdown
//! - `scoring`: Match points and time bonus
//! - `persistence`: Round snapshots and their stores
//! - `hooks`: Audio, menu and asset collaborators
//! - `round`: The round controller

pub mod core;
pub mod cards;
pub mod board;
pub mod timer;
pub mod scoring;
pub mod persistence;
pub mod hooks;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    CardSlot, EngineConfig, ScoreConfig,
    PairsError, Result,
    BoardRng,
    CancelToken, Delay, DelayStatus, Tween,
};

pub use crate::cards::{
    AssetHandle, CardData, PairKey,
    CardEntity, CardEvent, CardState, Poolable, Revealable,
};

pub use crate::board::{BoardLayout, BoardPool, GridSize};

pub use crate::timer::{CountdownTimer, TimerTick};

pub use crate::scoring::ScoreTracker;

pub use crate::persistence::{
    RoundSnapshot, SavedCard,
    SnapshotStore, MemoryStore, FileStore,
};

pub use crate::hooks::{
    AudioHooks, MenuHooks, Services, Silent,
    AssetSource, StaticAssets, DirectoryAssets,
};

pub use crate::round::{
    RoundController, Round, RoundOutcome, GameOverReason, PresetReport,
};
