//! Round controller: owns the board, timer and score for one play session
//! and turns card reveals into match, mismatch, hazard and win decisions.
//!
//! The controller is driven entirely from outside. A host calls
//! [`RoundController::flip_card`] for taps and [`RoundController::tick`]
//! once per frame; everything else (reveal completion, flip-back delays,
//! countdown expiry) happens inside `tick`.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use rust_pairs::core::EngineConfig;
//! use rust_pairs::hooks::{Services, StaticAssets};
//! use rust_pairs::round::{RoundController, RoundOutcome};
//!
//! let assets = StaticAssets::new().with_folder("Cards/FrontGraphics", ["a", "b", "c"]);
//! let mut game = RoundController::new(EngineConfig::default(), Services::headless(assets)).unwrap();
//! game.initialize().unwrap();
//!
//! game.start_round(2, 2).unwrap();
//! assert!(game.flip_card(0).unwrap());
//! assert_eq!(game.tick(Duration::from_millis(200)), RoundOutcome::InProgress);
//! assert_eq!(game.selection().len(), 1);
//! ```

use std::time::Duration;

use super::preset::{parse_preset, PresetReport};
use super::state::{GameOverReason, Round, RoundOutcome};
use crate::board::{BoardLayout, BoardPool, GridSize};
use crate::cards::{CardEvent, CardState, PairKey, Revealable};
use crate::core::{CardSlot, EngineConfig, PairsError, Result};
use crate::hooks::{load_with_fallback, Services};
use crate::persistence::{RoundSnapshot, SavedCard, SnapshotStore};
use crate::scoring::ScoreTracker;
use crate::timer::{CountdownTimer, TimerTick};

/// Drives rounds of the pairs game.
#[derive(Debug)]
pub struct RoundController {
    config: EngineConfig,
    services: Services,
    board: BoardPool,
    timer: CountdownTimer,
    score: ScoreTracker,
    round: Round,
    /// Engine clock: unpaused and paused time since construction.
    clock: Duration,
    rounds_started: usize,
}

impl RoundController {
    /// Create a controller. The card pool is allocated here.
    pub fn new(config: EngineConfig, services: Services) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: BoardPool::new(&config),
            score: ScoreTracker::new(config.score),
            timer: CountdownTimer::new(),
            round: Round::idle(),
            clock: Duration::ZERO,
            rounds_started: 0,
            config,
            services,
        })
    }

    /// Show the main menu and load the card fronts.
    pub fn initialize(&mut self) -> Result<()> {
        self.services.menus.show_main_menu(true);
        self.load_images()
    }

    /// Switch to a different card front folder. Takes effect on the next round.
    pub fn set_asset_folder(&mut self, folder: impl Into<String>) -> Result<()> {
        self.config.asset_folder = Some(folder.into());
        self.load_images()
    }

    fn load_images(&mut self) -> Result<()> {
        let images = load_with_fallback(
            self.services.assets.as_ref(),
            self.config.asset_folder.as_deref(),
            &self.config.default_asset_folder,
        )?;
        tracing::debug!(count = images.len(), "card images loaded");
        self.board.set_images(images);
        Ok(())
    }

    // =========================================================================
    // Round lifecycle
    // =========================================================================

    /// Start a fresh round on a `rows x cols` board.
    ///
    /// Invalid dimensions are rejected before anything is touched, so the
    /// previous round (if any) keeps running.
    pub fn start_round(&mut self, rows: u32, cols: u32) -> Result<()> {
        let grid = GridSize::new(rows, cols).validate()?;
        if self.board.images().is_empty() {
            self.load_images()?;
        }
        self.board.build_board(grid.rows, grid.cols)?;

        self.score.reset();
        self.timer.reset();
        self.timer
            .start(self.config.round_seconds(grid.total()), self.clock);
        self.round = Round::started(grid);
        self.rounds_started += 1;

        self.services.menus.show_main_menu(false);
        self.services.menus.show_pause_menu(false);
        self.services.menus.show_game_over_menu(false);
        self.services.menus.show_end_level_menu(false);

        tracing::info!(
            rows = grid.rows,
            cols = grid.cols,
            seconds = self.timer.remaining(),
            "round started"
        );
        Ok(())
    }

    /// Start a round for every well-formed `WxH` entry of a `;`-separated
    /// preset, in order. The last one started stays active.
    ///
    /// Entries that do not parse, or that describe an unplayable board, are
    /// skipped with a warning.
    pub fn start_preset(&mut self, preset: &str) -> PresetReport {
        let mut report = PresetReport::default();
        for entry in parse_preset(preset) {
            let started = entry.and_then(|grid| {
                self.start_round(grid.rows, grid.cols)?;
                Ok(grid)
            });
            match started {
                Ok(grid) => report.started.push(grid),
                Err(err) => {
                    let token = match &err {
                        PairsError::MalformedPreset { token } => token.clone(),
                        PairsError::InvalidDimensions { rows, cols } => {
                            GridSize::new(*rows, *cols).to_string()
                        }
                        other => other.to_string(),
                    };
                    tracing::warn!(entry = %token, error = %err, "skipping preset entry");
                    report.skipped.push(token);
                }
            }
        }
        report
    }

    /// Tear the round down: board back to the pool, score and timer cleared.
    pub fn reset_round(&mut self) {
        self.board.reset_board();
        self.score.reset();
        self.timer.reset();
        self.round = Round::idle();
        self.services.menus.show_pause_menu(false);
        tracing::debug!("round reset");
    }

    /// Pause or resume the round.
    pub fn set_paused(&mut self, paused: bool) {
        if self.round.paused == paused {
            return;
        }
        self.round.paused = paused;
        if paused {
            self.timer.pause(self.clock);
        } else {
            self.timer.resume(self.clock);
        }
        for card in self.board.cards_mut() {
            card.set_paused(paused);
        }
        self.services.menus.show_pause_menu(paused);
        tracing::debug!(paused, "pause toggled");
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Tap the card at board position `position`.
    ///
    /// Returns whether the tap started a flip.
    pub fn flip_card(&mut self, position: usize) -> Result<bool> {
        let slot = self
            .board
            .card_at(position)
            .map(|card| card.slot())
            .ok_or(PairsError::InvalidPosition {
                position,
                len: self.board.len(),
            })?;
        self.flip_slot(slot)
    }

    /// Tap the card in `slot`.
    pub fn flip_slot(&mut self, slot: CardSlot) -> Result<bool> {
        if !self.round.playing || self.round.paused {
            return Ok(false);
        }
        let card = self.board.card_mut(slot).ok_or(PairsError::UnknownCard(slot))?;
        let started = card.tap();
        if started {
            self.services.audio.on_flip();
        }
        Ok(started)
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Advance the round by `dt`.
    pub fn tick(&mut self, dt: Duration) -> RoundOutcome {
        self.clock += dt;
        if !self.round.playing {
            // Finished rounds still let in-flight flips land.
            for card in self.board.cards_mut() {
                card.tick(dt);
            }
            return self.round.outcome;
        }

        let mut revealed = Vec::new();
        let mut flipped_back = 0usize;
        for card in self.board.cards_mut() {
            let before = card.state();
            if let Some(CardEvent::Revealed(slot)) = card.tick(dt) {
                revealed.push(slot);
            }
            if before == CardState::Revealed && card.state() == CardState::FlippingBack {
                flipped_back += 1;
            }
        }
        for _ in 0..flipped_back {
            self.services.audio.on_flip();
        }
        // A card that started turning back this frame must not pair with a
        // reveal that lands on the same frame.
        self.prune_selection();

        for slot in revealed {
            if !self.round.playing {
                break;
            }
            if let Err(err) = self.on_card_revealed(slot) {
                tracing::warn!(%slot, error = %err, "reveal ignored");
            }
        }
        self.prune_selection();

        if self.round.playing {
            if let TimerTick::Expired = self.timer.tick(self.clock) {
                tracing::info!("round timed out");
                self.game_over(GameOverReason::Timeout);
            }
        }
        self.round.outcome
    }

    /// Drop selected cards that turned back on their own.
    fn prune_selection(&mut self) {
        let board = &self.board;
        self.round.selection.retain(|slot| {
            board
                .card(*slot)
                .is_some_and(|card| card.state() == CardState::Revealed)
        });
    }

    // =========================================================================
    // Selection resolution
    // =========================================================================

    /// React to a card finishing its face-up transition.
    pub fn on_card_revealed(&mut self, slot: CardSlot) -> Result<()> {
        if !self.round.playing {
            return Err(PairsError::NoActiveRound);
        }
        let key = self
            .board
            .card(slot)
            .and_then(|card| card.pair_key())
            .ok_or(PairsError::UnknownCard(slot))?;
        if !self.is_face_up(slot) {
            tracing::debug!(%slot, "reveal of a card that is not face-up ignored");
            return Ok(());
        }

        if key.is_hazard() {
            self.on_hazard_revealed(slot);
            return Ok(());
        }

        if let Some(card) = self.board.card_mut(slot) {
            card.schedule_flip_back(self.config.reveal_timeout);
        }
        self.round.selection.push(slot);

        if self.round.selection.len() > 2 {
            self.flush_overflow();
        }
        if self.round.selection.len() == 2 {
            self.resolve_selection();
        }
        Ok(())
    }

    fn on_hazard_revealed(&mut self, slot: CardSlot) {
        self.services.audio.on_hazard_found();
        if self.round.hazard_found {
            tracing::info!(%slot, "hazard found twice");
            self.game_over(GameOverReason::SecondHazard);
            return;
        }

        self.round.hazard_found = true;
        self.round.streak = 0;
        self.round.remaining = self.round.remaining.saturating_sub(1);
        if let Some(card) = self.board.card_mut(slot) {
            card.schedule_flip_back(self.config.reveal_timeout);
        }
        tracing::info!(%slot, remaining = self.round.remaining, "hazard found");
        self.check_win();
    }

    /// Turn the two oldest selected cards back immediately and keep the
    /// newest as the only live selection.
    fn flush_overflow(&mut self) {
        let flushed: Vec<CardSlot> = self.round.selection.drain(..2).collect();
        for slot in &flushed {
            if let Some(card) = self.board.card_mut(*slot) {
                card.schedule_flip_back(Duration::ZERO);
            }
        }
        tracing::debug!(?flushed, "selection overflow flushed");
    }

    fn resolve_selection(&mut self) {
        let first = self.round.selection[0];
        let second = self.round.selection[1];
        self.round.selection.clear();

        let key_of = |slot| self.board.card(slot).and_then(|card| card.pair_key());
        let same_pair = match (key_of(first), key_of(second)) {
            (Some(a), Some(b)) => a == b && a != PairKey::HAZARD,
            _ => false,
        };
        let matched = same_pair && self.is_face_up(first) && self.is_face_up(second);

        if matched {
            self.round.streak += 1;
            let points = self.score.on_match(self.round.streak);
            for slot in [first, second] {
                if let Some(card) = self.board.card_mut(slot) {
                    card.mark_matched();
                }
            }
            self.round.pairs_matched += 1;
            self.round.remaining = self.round.remaining.saturating_sub(2);
            self.services.audio.on_match();
            tracing::debug!(
                streak = self.round.streak,
                points,
                remaining = self.round.remaining,
                "pair matched"
            );
            self.check_win();
        } else {
            self.round.streak = 0;
            for slot in [first, second] {
                if let Some(card) = self.board.card_mut(slot) {
                    card.schedule_flip_back(self.config.mismatch_delay);
                }
            }
            self.services.audio.on_mismatch();
            tracing::debug!(%first, %second, "mismatch");
        }
    }

    fn is_face_up(&self, slot: CardSlot) -> bool {
        self.board
            .card(slot)
            .is_some_and(|card| card.state() == CardState::Revealed)
    }

    fn check_win(&mut self) {
        if !self.round.playing || self.round.remaining >= 2 {
            return;
        }
        let time_left = self.timer.stop(self.clock);
        let bonus = self.score.on_round_win(time_left);
        self.round.playing = false;
        self.round.selection.clear();
        self.round.outcome = RoundOutcome::Won;
        self.services.audio.on_win();
        self.services.menus.show_end_level_menu(true);
        tracing::info!(time_left, bonus, score = self.score.score(), "round won");
    }

    fn game_over(&mut self, reason: GameOverReason) {
        self.round.playing = false;
        self.round.selection.clear();
        self.round.outcome = RoundOutcome::GameOver(reason);
        self.timer.stop(self.clock);
        for card in self.board.cards_mut() {
            match card.state() {
                CardState::Matched => {}
                CardState::FlippingBack => card.lock(),
                _ => card.disable(),
            }
        }
        self.services.audio.on_game_over();
        self.services.menus.show_game_over_menu(true);
        tracing::info!(?reason, score = self.score.score(), "game over");
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Capture the current round.
    pub fn snapshot(&self) -> Result<RoundSnapshot> {
        let grid = self.board.grid().ok_or(PairsError::NoActiveRound)?;
        let cards = self
            .board
            .cards()
            .iter()
            .filter_map(|card| {
                let data = card.data()?;
                Some(SavedCard {
                    asset_ref: data.asset.as_str().to_string(),
                    pair_key: data.pair_key.raw(),
                    matched: card.state() == CardState::Matched,
                })
            })
            .collect();

        Ok(RoundSnapshot {
            score: self.score.score(),
            remaining_time: self.timer.peek(self.clock),
            grid_rows: grid.rows,
            grid_cols: grid.cols,
            cards,
            hazard_found: self.round.hazard_found,
            streak: self.round.streak,
        })
    }

    /// Write the current round to `store`.
    pub fn save_round(&self, store: &mut dyn SnapshotStore) -> Result<()> {
        let snapshot = self.snapshot()?;
        store.save(&snapshot)?;
        tracing::info!(score = snapshot.score, remaining_time = snapshot.remaining_time, "round saved");
        Ok(())
    }

    /// Resume the round saved in `store`. Returns `false` if there is none.
    pub fn load_round(&mut self, store: &dyn SnapshotStore) -> Result<bool> {
        match store.load()? {
            Some(snapshot) => {
                self.restore_round(&snapshot)?;
                Ok(true)
            }
            None => {
                tracing::debug!("no saved round");
                Ok(false)
            }
        }
    }

    /// Rebuild a round from a snapshot, card for card.
    pub fn restore_round(&mut self, snapshot: &RoundSnapshot) -> Result<()> {
        snapshot.validate()?;
        let cards = snapshot.cards.iter().map(SavedCard::card_data).collect();
        self.board
            .restore_board(snapshot.grid_rows, snapshot.grid_cols, cards)?;

        for (card, saved) in self.board.cards_mut().iter_mut().zip(&snapshot.cards) {
            if saved.matched {
                card.mark_matched();
            }
        }

        let grid = GridSize::new(snapshot.grid_rows, snapshot.grid_cols);
        let mut round = Round::started(grid);
        round.pairs_matched = snapshot.matched_pairs();
        round.remaining = snapshot.remaining_count();
        round.hazard_found = snapshot.hazard_found;
        round.streak = snapshot.streak;
        self.round = round;

        self.score.set_score(snapshot.score);
        self.timer.reset();
        self.timer.start(snapshot.remaining_time, self.clock);
        self.services.menus.show_main_menu(false);
        self.services.menus.show_game_over_menu(false);
        self.services.menus.show_end_level_menu(false);

        tracing::info!(
            grid = %grid,
            score = snapshot.score,
            remaining = self.round.remaining,
            "round restored"
        );
        self.check_win();
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn board(&self) -> &BoardPool {
        &self.board
    }

    /// Board rows, columns and card data for a presentation layer.
    #[must_use]
    pub fn layout(&self) -> BoardLayout<'_> {
        self.board.layout()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    #[must_use]
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Whole seconds left on the countdown.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.peek(self.clock)
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.round.outcome
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.round.playing
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.round.paused
    }

    /// Revealed cards awaiting a partner, oldest first.
    #[must_use]
    pub fn selection(&self) -> &[CardSlot] {
        self.round.selection()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.round.streak
    }

    /// Rounds started since construction. Restored rounds are not counted.
    #[must_use]
    pub fn rounds_started(&self) -> usize {
        self.rounds_started
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::StaticAssets;

    const FLIP: Duration = Duration::from_millis(200);

    fn controller() -> RoundController {
        let assets = StaticAssets::new().with_folder("Cards/FrontGraphics", ["a", "b", "c", "d"]);
        let mut game = RoundController::new(EngineConfig::default(), Services::headless(assets)).unwrap();
        game.initialize().unwrap();
        game
    }

    /// Board positions of both cards sharing each pair key, plus the hazard.
    fn pairs(game: &RoundController) -> (Vec<(usize, usize)>, Option<usize>) {
        let cards = game.layout().cards;
        let mut pairs = Vec::new();
        let mut hazard = None;
        for (i, card) in cards.iter().enumerate() {
            if card.is_hazard() {
                hazard = Some(i);
                continue;
            }
            if let Some(j) = cards[i + 1..].iter().position(|c| c.pair_key == card.pair_key) {
                pairs.push((i, i + 1 + j));
            }
        }
        (pairs, hazard)
    }

    fn reveal(game: &mut RoundController, position: usize) {
        assert!(game.flip_card(position).unwrap());
        game.tick(FLIP);
    }

    #[test]
    fn test_flush_keeps_newest_and_turns_back_oldest() {
        let mut game = controller();
        game.start_round(2, 3).unwrap();
        let (pairs, _) = pairs(&game);
        let (a, _) = pairs[0];
        let (b, _) = pairs[1];
        let (c, _) = pairs[2];

        // Park two unresolved reveals in the selection to force the guard.
        for position in [a, b] {
            let card = game.board.card_at_mut(position).unwrap();
            card.tap();
            card.tick(FLIP);
            let slot = card.slot();
            game.round.selection.push(slot);
        }
        let newest = game.board.card_at(c).unwrap().slot();
        game.board.card_at_mut(c).unwrap().tap();
        game.board.card_at_mut(c).unwrap().tick(FLIP);

        game.on_card_revealed(newest).unwrap();
        assert_eq!(game.selection(), &[newest]);

        game.tick(Duration::from_millis(1));
        assert_eq!(game.board.card_at(a).unwrap().state(), CardState::FlippingBack);
        assert_eq!(game.board.card_at(b).unwrap().state(), CardState::FlippingBack);
        assert_eq!(game.board.card_at(c).unwrap().state(), CardState::Revealed);
        assert!(game.round().is_consistent());
    }

    #[test]
    fn test_remaining_count_tracks_matches() {
        let mut game = controller();
        game.start_round(3, 3).unwrap();
        let (pairs, hazard) = pairs(&game);

        for &(x, y) in &pairs[..3] {
            reveal(&mut game, x);
            reveal(&mut game, y);
            assert!(game.round().is_consistent());
        }
        assert_eq!(game.round().remaining(), 3);

        reveal(&mut game, hazard.unwrap());
        assert!(game.round().hazard_found());
        assert_eq!(game.round().remaining(), 2);
        assert!(game.round().is_consistent());
        assert_eq!(game.outcome(), RoundOutcome::InProgress);
    }

    #[test]
    fn test_hazard_not_selected() {
        let mut game = controller();
        game.start_round(1, 3).unwrap();
        let (_, hazard) = pairs(&game);
        reveal(&mut game, hazard.unwrap());
        assert!(game.selection().is_empty());
    }

    #[test]
    fn test_reveal_timeout_hides_lone_card() {
        let mut game = controller();
        game.start_round(2, 2).unwrap();
        reveal(&mut game, 0);
        assert_eq!(game.selection().len(), 1);

        game.tick(EngineConfig::default().reveal_timeout);
        assert_eq!(game.board.card_at(0).unwrap().state(), CardState::FlippingBack);
        assert!(game.selection().is_empty());
        game.tick(FLIP);
        assert_eq!(game.board.card_at(0).unwrap().state(), CardState::Hidden);
    }

    #[test]
    fn test_taps_ignored_while_paused_or_idle() {
        let mut game = controller();
        assert!(matches!(
            game.flip_card(0),
            Err(PairsError::InvalidPosition { position: 0, len: 0 })
        ));

        game.start_round(2, 2).unwrap();
        game.set_paused(true);
        assert!(!game.flip_card(0).unwrap());
        game.set_paused(false);
        assert!(game.flip_card(0).unwrap());
    }

    #[test]
    fn test_reveal_without_round_is_error() {
        let mut game = controller();
        assert!(matches!(
            game.on_card_revealed(CardSlot(0)),
            Err(PairsError::NoActiveRound)
        ));
    }

    #[test]
    fn test_snapshot_requires_board() {
        let game = controller();
        assert!(matches!(game.snapshot(), Err(PairsError::NoActiveRound)));
    }
}
