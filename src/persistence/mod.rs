//! Mid-round persistence.
//!
//! ## Key Types
//!
//! - `RoundSnapshot` / `SavedCard`: The persisted record
//! - `SnapshotStore`: Storage backend trait
//! - `MemoryStore`: Key-value store of binary records
//! - `FileStore`: Single JSON file

pub mod snapshot;
pub mod store;

pub use snapshot::{RoundSnapshot, SavedCard};
pub use store::{FileStore, MemoryStore, SnapshotStore, ROUND_KEY};
