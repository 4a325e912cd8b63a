//! Per-round bookkeeping.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::GridSize;
use crate::core::CardSlot;

/// Why a round was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The hazard card was found a second time.
    SecondHazard,
    /// The countdown reached zero.
    Timeout,
}

/// How the current round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// No round started, or the round was reset.
    Idle,
    InProgress,
    Won,
    GameOver(GameOverReason),
}

impl RoundOutcome {
    /// Has the round ended, won or lost?
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, RoundOutcome::Won | RoundOutcome::GameOver(_))
    }
}

/// Mutable state of one round.
///
/// `remaining == total_cards - 2 * pairs_matched - hazard_removed` holds
/// after every resolved selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub(crate) grid: GridSize,
    pub(crate) total_cards: usize,
    pub(crate) remaining: usize,
    pub(crate) pairs_matched: usize,
    /// Revealed cards awaiting a partner, oldest first.
    /// Inline capacity of 3 covers the transient over-selection case.
    pub(crate) selection: SmallVec<[CardSlot; 3]>,
    pub(crate) streak: u32,
    pub(crate) hazard_found: bool,
    pub(crate) paused: bool,
    pub(crate) playing: bool,
    pub(crate) outcome: RoundOutcome,
}

impl Round {
    /// No round in progress.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            grid: GridSize::new(0, 0),
            total_cards: 0,
            remaining: 0,
            pairs_matched: 0,
            selection: SmallVec::new(),
            streak: 0,
            hazard_found: false,
            paused: false,
            playing: false,
            outcome: RoundOutcome::Idle,
        }
    }

    /// A freshly started round on `grid`.
    #[must_use]
    pub fn started(grid: GridSize) -> Self {
        let total = grid.total();
        Self {
            grid,
            total_cards: total,
            remaining: total,
            playing: true,
            outcome: RoundOutcome::InProgress,
            ..Self::idle()
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards not yet matched (the discovered hazard card excluded).
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn pairs_matched(&self) -> usize {
        self.pairs_matched
    }

    #[must_use]
    pub fn selection(&self) -> &[CardSlot] {
        &self.selection
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn hazard_found(&self) -> bool {
        self.hazard_found
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Does the remaining-count bookkeeping add up?
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let removed = 2 * self.pairs_matched + usize::from(self.hazard_found);
        self.total_cards.checked_sub(removed) == Some(self.remaining)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::idle()
    }
}
