//! Engine configuration.
//!
//! Timing, scoring and asset settings are supplied once when the engine is
//! built. Defaults match the shipped game: 200 ms flips, a 1 s pause before
//! mismatched cards turn back, 5 s of countdown per card on the board.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{PairsError, Result};
use crate::cards::AssetHandle;

/// Score accrual parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Points for every match.
    pub base: u32,

    /// Extra points per streak step on a match.
    pub streak_multiplier: u32,

    /// Points per second left on the clock when a round is won.
    pub time_bonus: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base: 10,
            streak_multiplier: 10,
            time_bonus: 10,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for board construction.
    /// Same seed and same sequence of rounds produce the same boards.
    pub seed: u64,

    /// Card entities allocated up front by the pool.
    pub pool_size: usize,

    /// Length of a single flip transition (face-up or face-down).
    pub flip_duration: Duration,

    /// Delay before a mismatched pair starts turning back.
    pub mismatch_delay: Duration,

    /// Delay after which an unresolved face-up card turns back by itself.
    pub reveal_timeout: Duration,

    /// Countdown seconds granted per card on the board.
    pub seconds_per_card: u32,

    /// Score accrual parameters.
    pub score: ScoreConfig,

    /// Folder the card fronts are loaded from. `None` uses the default folder.
    pub asset_folder: Option<String>,

    /// Fallback folder for card fronts.
    pub default_asset_folder: String,

    /// Front asset of the hazard card.
    pub hazard_asset: AssetHandle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_size: 36,
            flip_duration: Duration::from_millis(200),
            mismatch_delay: Duration::from_secs(1),
            reveal_timeout: Duration::from_secs(5),
            seconds_per_card: 5,
            score: ScoreConfig::default(),
            asset_folder: None,
            default_asset_folder: "Cards/FrontGraphics".to_string(),
            hazard_asset: AssetHandle::new("Cards/Hazard"),
        }
    }
}

impl EngineConfig {
    /// Set the board seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of pre-allocated card entities.
    #[must_use]
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the flip transition length.
    #[must_use]
    pub fn with_flip_duration(mut self, duration: Duration) -> Self {
        self.flip_duration = duration;
        self
    }

    /// Set the delay before a mismatched pair turns back.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the delay after which an unresolved card turns back.
    #[must_use]
    pub fn with_reveal_timeout(mut self, timeout: Duration) -> Self {
        self.reveal_timeout = timeout;
        self
    }

    /// Set the countdown seconds granted per card.
    #[must_use]
    pub fn with_seconds_per_card(mut self, seconds: u32) -> Self {
        self.seconds_per_card = seconds;
        self
    }

    /// Set the score parameters.
    #[must_use]
    pub fn with_score(mut self, score: ScoreConfig) -> Self {
        self.score = score;
        self
    }

    /// Set the folder card fronts are loaded from.
    #[must_use]
    pub fn with_asset_folder(mut self, folder: impl Into<String>) -> Self {
        self.asset_folder = Some(folder.into());
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.flip_duration.is_zero() {
            return Err(PairsError::InvalidConfig {
                reason: "flip_duration must be non-zero".to_string(),
            });
        }
        if self.default_asset_folder.trim().is_empty() {
            return Err(PairsError::InvalidConfig {
                reason: "default_asset_folder must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Countdown length for a board of `total_cards` cards.
    #[must_use]
    pub fn round_seconds(&self, total_cards: usize) -> u32 {
        u32::try_from(total_cards)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.seconds_per_card)
    }
}
