//! Card system: per-round card data and the pooled card entity.
//!
//! ## Key Types
//!
//! - `PairKey`: Identity shared by the two cards of a pair (or the hazard sentinel)
//! - `AssetHandle`: Opaque front image reference
//! - `CardData`: Pair key + asset, assigned fresh every round
//! - `CardEntity`: Flip state machine, owned by the board pool
//! - `Revealable` / `Poolable`: The two capabilities a card exposes

pub mod data;
pub mod entity;

pub use data::{AssetHandle, CardData, PairKey};
pub use entity::{CardEntity, CardEvent, CardState, Poolable, Revealable};
