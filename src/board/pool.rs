//! Board pool: card entity recycling and board construction.
//!
//! The pool allocates card entities once and hands them out round after
//! round. Building a board draws fresh pair keys, assigns card fronts,
//! shuffles the assembled card data and attaches it to acquired entities.
//!
//! ## Usage
//!
//! ```
//! use rust_pairs::board::BoardPool;
//! use rust_pairs::cards::AssetHandle;
//! use rust_pairs::core::EngineConfig;
//!
//! let mut pool = BoardPool::new(&EngineConfig::default());
//! pool.set_images(vec![AssetHandle::new("cat"), AssetHandle::new("dog")]);
//!
//! pool.build_board(3, 3).unwrap();
//! assert_eq!(pool.len(), 9);
//! assert_eq!(pool.layout().cards.iter().filter(|c| c.is_hazard()).count(), 1);
//!
//! pool.reset_board();
//! assert!(pool.is_empty());
//! ```

use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};

use super::grid::GridSize;
use crate::cards::{AssetHandle, CardData, CardEntity, PairKey, Poolable};
use crate::core::{BoardRng, CardSlot, EngineConfig, PairsError, Result};

/// Lowest pair key handed out.
const PAIR_KEY_MIN: i32 = 1000;
/// Exclusive upper bound for pair keys on ordinary boards.
const PAIR_KEY_MAX: i32 = 10_000;

/// Read-only view of the current board for layout.
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout<'a> {
    pub rows: u32,
    pub cols: u32,
    /// Card data in board order (row-major).
    pub cards: &'a [CardData],
}

/// Owns every card entity, active or pooled.
#[derive(Debug)]
pub struct BoardPool {
    flip_duration: Duration,
    preallocated: usize,
    next_slot: CardSlot,

    /// Recycled entities waiting for the next board.
    inactive: Vec<CardEntity>,
    /// Entities on the current board, in board order.
    active: Vec<CardEntity>,
    /// slot -> index into `active`
    index: FxHashMap<CardSlot, usize>,

    grid: Option<GridSize>,
    layout: Vec<CardData>,

    key_rng: BoardRng,
    shuffle_rng: BoardRng,
    images: Vec<AssetHandle>,
    hazard_asset: AssetHandle,
}

impl BoardPool {
    /// Create a pool with `config.pool_size` pre-allocated entities.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let rng = BoardRng::new(config.seed);
        let mut pool = Self {
            flip_duration: config.flip_duration,
            preallocated: config.pool_size,
            next_slot: CardSlot::new(0),
            inactive: Vec::with_capacity(config.pool_size),
            active: Vec::new(),
            index: FxHashMap::default(),
            grid: None,
            layout: Vec::new(),
            key_rng: rng.for_context("pair_keys"),
            shuffle_rng: rng.for_context("shuffle"),
            images: Vec::new(),
            hazard_asset: config.hazard_asset.clone(),
        };
        for _ in 0..config.pool_size {
            let entity = pool.allocate();
            pool.inactive.push(entity);
        }
        pool
    }

    /// Replace the card front set used by future boards.
    pub fn set_images(&mut self, images: Vec<AssetHandle>) {
        self.images = images;
    }

    /// Card fronts used by future boards.
    #[must_use]
    pub fn images(&self) -> &[AssetHandle] {
        &self.images
    }

    fn allocate(&mut self) -> CardEntity {
        let slot = self.next_slot;
        self.next_slot = slot.next();
        CardEntity::new(slot, self.flip_duration)
    }

    /// Take an entity from the pool, constructing one if the pool is empty.
    pub fn acquire(&mut self) -> CardEntity {
        match self.inactive.pop() {
            Some(entity) => entity,
            None => {
                let entity = self.allocate();
                tracing::warn!(
                    slot = %entity.slot(),
                    preallocated = self.preallocated,
                    "card pool exhausted, allocating a new entity"
                );
                entity
            }
        }
    }

    /// Return an entity to the pool.
    pub fn release(&mut self, mut entity: CardEntity) {
        entity.recycle();
        self.inactive.push(entity);
    }

    /// Build a fresh, shuffled board of `rows * cols` cards.
    ///
    /// Every pair key appears on exactly two cards. An odd card count adds
    /// a single hazard card. Card fronts are reused cyclically when there
    /// are fewer images than pairs.
    pub fn build_board(&mut self, rows: u32, cols: u32) -> Result<()> {
        let grid = GridSize::new(rows, cols).validate()?;
        let mut cards = self.assemble_card_data(grid.total())?;
        self.shuffle_rng.shuffle(&mut cards);

        self.reset_board();
        self.place(grid, cards);
        Ok(())
    }

    /// Rebuild a board from a literal card list, without shuffling.
    pub fn restore_board(&mut self, rows: u32, cols: u32, cards: Vec<CardData>) -> Result<()> {
        let grid = GridSize::new(rows, cols).validate()?;
        if cards.len() != grid.total() {
            return Err(PairsError::CorruptSnapshot {
                reason: format!(
                    "{} cards saved for a {} board of {}",
                    cards.len(),
                    grid,
                    grid.total()
                ),
            });
        }
        if cards.iter().filter(|c| c.is_hazard()).count() > 1 {
            return Err(PairsError::CorruptSnapshot {
                reason: "more than one hazard card".to_string(),
            });
        }

        self.reset_board();
        self.place(grid, cards);
        Ok(())
    }

    fn assemble_card_data(&mut self, total: usize) -> Result<Vec<CardData>> {
        let pair_count = total / 2;
        if pair_count > 0 && self.images.is_empty() {
            return Err(PairsError::NoAssets {
                folder: String::new(),
            });
        }
        if self.images.len() < pair_count {
            tracing::warn!(
                images = self.images.len(),
                pairs = pair_count,
                "fewer card images than pairs, reusing images"
            );
        }

        let keys = self.draw_pair_keys(pair_count);
        let mut cards = Vec::with_capacity(total);
        for (i, key) in keys.into_iter().enumerate() {
            let asset = self.images[i % self.images.len()].clone();
            cards.push(CardData::new(key, asset.clone()));
            cards.push(CardData::new(key, asset));
        }
        if total % 2 != 0 {
            cards.push(CardData::hazard(self.hazard_asset.clone()));
        }
        Ok(cards)
    }

    /// Draw `count` distinct pair keys.
    fn draw_pair_keys(&mut self, count: usize) -> Vec<PairKey> {
        let span = (count as i64 * 4).max((PAIR_KEY_MAX - PAIR_KEY_MIN) as i64);
        let upper = (PAIR_KEY_MIN as i64 + span).min(i32::MAX as i64) as i32;

        let mut seen = FxHashSet::default();
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = self.key_rng.gen_range(PAIR_KEY_MIN..upper);
            if seen.insert(key) {
                keys.push(PairKey::new(key));
            }
        }
        keys
    }

    fn place(&mut self, grid: GridSize, cards: Vec<CardData>) {
        self.active.reserve(cards.len());
        for data in &cards {
            let mut entity = self.acquire();
            entity.assign(data.clone());
            self.index.insert(entity.slot(), self.active.len());
            self.active.push(entity);
        }
        self.layout = cards;
        self.grid = Some(grid);
    }

    /// Return every active entity to the pool and forget the board.
    pub fn reset_board(&mut self) {
        let active = std::mem::take(&mut self.active);
        for entity in active {
            self.release(entity);
        }
        self.index.clear();
        self.layout.clear();
        self.grid = None;
    }

    /// Current board size, if a board is built.
    #[must_use]
    pub fn grid(&self) -> Option<GridSize> {
        self.grid
    }

    /// Read-only board description for layout.
    #[must_use]
    pub fn layout(&self) -> BoardLayout<'_> {
        let grid = self.grid.unwrap_or(GridSize::new(0, 0));
        BoardLayout {
            rows: grid.rows,
            cols: grid.cols,
            cards: &self.layout,
        }
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Entities waiting in the pool.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.inactive.len()
    }

    /// Entities ever allocated, active or pooled.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next_slot.raw() as usize
    }

    /// Cards on the board, in board order.
    #[must_use]
    pub fn cards(&self) -> &[CardEntity] {
        &self.active
    }

    /// Mutable access to every card on the board.
    pub fn cards_mut(&mut self) -> &mut [CardEntity] {
        &mut self.active
    }

    /// Card at a board position.
    #[must_use]
    pub fn card_at(&self, position: usize) -> Option<&CardEntity> {
        self.active.get(position)
    }

    /// Mutable card at a board position.
    pub fn card_at_mut(&mut self, position: usize) -> Option<&mut CardEntity> {
        self.active.get_mut(position)
    }

    /// Card by slot.
    #[must_use]
    pub fn card(&self, slot: CardSlot) -> Option<&CardEntity> {
        self.index.get(&slot).map(|&i| &self.active[i])
    }

    /// Mutable card by slot.
    pub fn card_mut(&mut self, slot: CardSlot) -> Option<&mut CardEntity> {
        let i = *self.index.get(&slot)?;
        self.active.get_mut(i)
    }
}
