//! Card slot identification.
//!
//! Every pooled card entity has a unique `CardSlot`. Slots are allocated
//! once by the board pool and survive across rounds: a recycled entity keeps
//! its slot, only its per-round card data changes.
//!
//! ## Usage
//!
//! ```
//! use rust_pairs::core::CardSlot;
//!
//! let first = CardSlot::new(0);
//! let second = first.next();
//!
//! assert_eq!(second.raw(), 1);
//! assert_eq!(format!("{}", second), "Card(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a pooled card entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardSlot(pub u32);

impl CardSlot {
    /// Create a slot ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The slot allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CardSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
