//! Board construction and the card entity pool.
//!
//! ## Key Types
//!
//! - `GridSize`: Logical `(rows, cols)` of a board, parsed from `WxH`
//! - `BoardPool`: Owns every card entity; builds, shuffles and recycles boards
//! - `BoardLayout`: Read-only board view handed to the layout collaborator

pub mod grid;
pub mod pool;

pub use grid::GridSize;
pub use pool::{BoardLayout, BoardPool};
