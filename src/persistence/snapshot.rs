//! Round snapshot record.
//!
//! A snapshot captures everything needed to resume a round exactly: score,
//! seconds left, board size and the literal card list in board order.
//! Matched cards are kept (with `matched = true`) so progress survives a
//! reload.
//!
//! Field names on the wire: `score`, `remainingTime`, `gridRows`,
//! `gridCols`, `cards[{assetRef, pairKey, matched}]`, plus `hazardFound`
//! and `streak`, which default when absent.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{AssetHandle, CardData, PairKey};
use crate::core::{PairsError, Result};

/// One card of a saved board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    pub asset_ref: String,
    pub pair_key: i32,
    pub matched: bool,
}

impl SavedCard {
    /// Card data to rebuild the entity from.
    #[must_use]
    pub fn card_data(&self) -> CardData {
        CardData::new(PairKey::new(self.pair_key), AssetHandle::new(self.asset_ref.clone()))
    }
}

/// Complete saved round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub score: u32,
    pub remaining_time: u32,
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub cards: Vec<SavedCard>,
    #[serde(default)]
    pub hazard_found: bool,
    #[serde(default)]
    pub streak: u32,
}

impl RoundSnapshot {
    /// Number of fully matched pairs.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.matched && !PairKey::new(c.pair_key).is_hazard())
            .count()
            / 2
    }

    /// Cards still in play after restoring this snapshot.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.cards.len() - 2 * self.matched_pairs() - usize::from(self.hazard_found && self.has_hazard())
    }

    fn has_hazard(&self) -> bool {
        self.cards.iter().any(|c| PairKey::new(c.pair_key).is_hazard())
    }

    /// Check the structural rules a playable board must follow.
    pub fn validate(&self) -> Result<()> {
        let corrupt = |reason: String| Err(PairsError::CorruptSnapshot { reason });

        let expected = self.grid_rows as usize * self.grid_cols as usize;
        if expected < 2 {
            return corrupt(format!("board {}x{} is too small", self.grid_cols, self.grid_rows));
        }
        if self.cards.len() != expected {
            return corrupt(format!("{} cards saved, board holds {}", self.cards.len(), expected));
        }
        if self.hazard_found && !self.has_hazard() {
            return corrupt("hazard marked found on a board without one".to_string());
        }

        // pair key -> (cards, matched cards)
        let mut pairs: FxHashMap<i32, (usize, usize)> = FxHashMap::default();
        for card in &self.cards {
            let entry = pairs.entry(card.pair_key).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += usize::from(card.matched);
        }

        for (&key, &(count, matched)) in &pairs {
            if PairKey::new(key).is_hazard() {
                if count > 1 {
                    return corrupt("more than one hazard card".to_string());
                }
                if matched > 0 {
                    return corrupt("hazard card marked as matched".to_string());
                }
            } else {
                if count != 2 {
                    return corrupt(format!("pair key {key} appears on {count} cards"));
                }
                if matched == 1 {
                    return corrupt(format!("pair key {key} is half matched"));
                }
            }
        }
        Ok(())
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| PairsError::persistence("encode snapshot", e))
    }

    /// Decode and validate binary produced by [`RoundSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes).map_err(|e| PairsError::CorruptSnapshot {
            reason: e.to_string(),
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PairsError::persistence("encode snapshot", e))
    }

    /// Decode and validate JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| PairsError::CorruptSnapshot {
            reason: e.to_string(),
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
