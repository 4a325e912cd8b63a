//! Per-round card data: pair identity and front asset.

use serde::{Deserialize, Serialize};

/// Identity shared by the two cards of a pair.
///
/// Equality of pair keys decides a match. [`PairKey::HAZARD`] is reserved
/// for the single partnerless hazard card of an odd-sized board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(pub i32);

impl PairKey {
    /// Reserved key of the hazard card.
    pub const HAZARD: PairKey = PairKey(i32::MIN);

    /// Create a pair key.
    #[must_use]
    pub const fn new(key: i32) -> Self {
        Self(key)
    }

    /// Get the raw key.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Is this the hazard sentinel?
    #[must_use]
    pub const fn is_hazard(self) -> bool {
        self.0 == i32::MIN
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_hazard() {
            write!(f, "Pair(hazard)")
        } else {
            write!(f, "Pair({})", self.0)
        }
    }
}

/// Opaque handle to a card front image.
///
/// The engine only stores and compares handles; loading and drawing the
/// image is the renderer's business.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(pub String);

impl AssetHandle {
    /// Create a handle from an asset reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The asset reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data assigned to a pooled card for one round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardData {
    pub pair_key: PairKey,
    pub asset: AssetHandle,
}

impl CardData {
    /// Create card data.
    #[must_use]
    pub fn new(pair_key: PairKey, asset: AssetHandle) -> Self {
        Self { pair_key, asset }
    }

    /// Card data for the hazard card.
    #[must_use]
    pub fn hazard(asset: AssetHandle) -> Self {
        Self::new(PairKey::HAZARD, asset)
    }

    /// Is this the hazard card?
    #[must_use]
    pub fn is_hazard(&self) -> bool {
        self.pair_key.is_hazard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_sentinel() {
        assert!(PairKey::HAZARD.is_hazard());
        assert!(!PairKey::new(42).is_hazard());
        assert!(CardData::hazard(AssetHandle::new("skull")).is_hazard());
    }

    #[test]
    fn test_display() {
        assert_eq!(PairKey::new(42).to_string(), "Pair(42)");
        assert_eq!(PairKey::HAZARD.to_string(), "Pair(hazard)");
        assert_eq!(AssetHandle::new("Cards/cat").to_string(), "Cards/cat");
    }

    #[test]
    fn test_pair_key_serializes_as_integer() {
        let json = serde_json::to_string(&PairKey::new(1234)).unwrap();
        assert_eq!(json, "1234");
    }
}
