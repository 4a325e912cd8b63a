//! Board pool integration tests.
//!
//! Property tests over board construction: every non-hazard key is on
//! exactly two cards, odd boards carry one hazard, and the shuffle only
//! permutes the assembled cards.

use proptest::prelude::*;
use rust_pairs::board::{BoardPool, GridSize};
use rust_pairs::cards::{AssetHandle, CardState, PairKey};
use rust_pairs::core::{BoardRng, EngineConfig};
use rustc_hash::{FxHashMap, FxHashSet};

fn images(n: usize) -> Vec<AssetHandle> {
    (0..n).map(|i| AssetHandle::new(format!("Cards/FrontGraphics/{i}.png"))).collect()
}

fn pool(seed: u64, image_count: usize) -> BoardPool {
    let mut pool = BoardPool::new(&EngineConfig::default().with_seed(seed));
    pool.set_images(images(image_count));
    pool
}

fn key_counts(pool: &BoardPool) -> FxHashMap<PairKey, usize> {
    let mut counts = FxHashMap::default();
    for card in pool.layout().cards {
        *counts.entry(card.pair_key).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Test that a 4x4 board has eight distinct pairs and no hazard.
#[test]
fn test_4x4_board() {
    let mut pool = pool(7, 8);
    pool.build_board(4, 4).unwrap();

    let counts = key_counts(&pool);
    assert_eq!(pool.len(), 16);
    assert_eq!(counts.len(), 8);
    assert!(counts.values().all(|&n| n == 2));
    assert!(pool.layout().cards.iter().all(|c| !c.is_hazard()));
}

/// Test that a 3x3 board has four pairs plus one hazard.
#[test]
fn test_3x3_board() {
    let mut pool = pool(7, 8);
    pool.build_board(3, 3).unwrap();

    let counts = key_counts(&pool);
    assert_eq!(counts.get(&PairKey::HAZARD), Some(&1));
    assert_eq!(counts.iter().filter(|&(k, &n)| !k.is_hazard() && n == 2).count(), 4);
}

/// Test that layout exposes rows and columns as built.
#[test]
fn test_layout_dimensions() {
    let mut pool = pool(1, 4);
    pool.build_board(2, 5).unwrap();
    let layout = pool.layout();
    assert_eq!((layout.rows, layout.cols), (2, 5));
    assert_eq!(layout.cards.len(), 10);
    assert_eq!(pool.grid(), Some(GridSize::new(2, 5)));
}

/// Test that a board larger than the pool grows the pool instead of failing.
#[test]
fn test_pool_grows_on_demand() {
    let mut pool = BoardPool::new(&EngineConfig::default().with_pool_size(4));
    pool.set_images(images(3));
    pool.build_board(5, 6).unwrap();

    assert_eq!(pool.len(), 30);
    assert_eq!(pool.allocated(), 30);

    pool.reset_board();
    assert_eq!(pool.pooled(), 30);

    // The next board reuses the grown pool.
    pool.build_board(4, 4).unwrap();
    assert_eq!(pool.allocated(), 30);
}

/// Test that entities come back hidden and interactive every round.
#[test]
fn test_rebuild_recycles_state() {
    let mut pool = pool(3, 4);
    pool.build_board(2, 2).unwrap();
    for card in pool.cards_mut() {
        card.disable();
    }

    pool.build_board(2, 2).unwrap();
    assert!(pool
        .cards()
        .iter()
        .all(|c| c.state() == CardState::Hidden && c.is_interactive()));
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Every non-hazard key appears on exactly two cards; odd boards hold
    /// exactly one hazard and even boards none.
    #[test]
    fn prop_every_card_has_one_partner(
        seed in any::<u64>(),
        rows in 1u32..7,
        cols in 1u32..7,
        image_count in 1usize..10,
    ) {
        prop_assume!(rows * cols >= 2);
        let mut pool = pool(seed, image_count);
        pool.build_board(rows, cols).unwrap();

        let total = (rows * cols) as usize;
        let counts = key_counts(&pool);
        let hazards = counts.get(&PairKey::HAZARD).copied().unwrap_or(0);

        prop_assert_eq!(pool.len(), total);
        prop_assert_eq!(hazards, total % 2);
        for (key, count) in &counts {
            if !key.is_hazard() {
                prop_assert_eq!(*count, 2);
            }
        }
        prop_assert_eq!(counts.len() - hazards, total / 2);
    }

    /// Both cards of a pair share a front image, chosen cyclically.
    #[test]
    fn prop_pairs_share_images(
        seed in any::<u64>(),
        rows in 2u32..6,
        cols in 2u32..6,
        image_count in 1usize..6,
    ) {
        let mut pool = pool(seed, image_count);
        pool.build_board(rows, cols).unwrap();

        let mut by_key: FxHashMap<PairKey, &AssetHandle> = FxHashMap::default();
        for card in pool.layout().cards.iter().filter(|c| !c.is_hazard()) {
            let asset = by_key.entry(card.pair_key).or_insert(&card.asset);
            prop_assert_eq!(*asset, &card.asset);
        }

        let used: FxHashSet<_> = by_key.values().collect();
        let pairs = (rows * cols / 2) as usize;
        prop_assert_eq!(used.len(), pairs.min(image_count));
    }

    /// Shuffling keeps the multiset of elements.
    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>(), mut items in prop::collection::vec(any::<i32>(), 0..64)) {
        let mut shuffled = items.clone();
        BoardRng::new(seed).shuffle(&mut shuffled);

        items.sort_unstable();
        shuffled.sort_unstable();
        prop_assert_eq!(items, shuffled);
    }

    /// Entities are visible by slot exactly as laid out.
    #[test]
    fn prop_slot_index_matches_layout(seed in any::<u64>(), rows in 1u32..6, cols in 2u32..6) {
        let mut pool = pool(seed, 4);
        pool.build_board(rows, cols).unwrap();

        for (i, card) in pool.cards().iter().enumerate() {
            let by_slot = pool.card(card.slot()).unwrap();
            prop_assert_eq!(by_slot.data(), Some(&pool.layout().cards[i]));
        }
    }
}

/// Test that the shuffle reaches every ordering of a small board.
#[test]
fn test_shuffle_reaches_every_permutation() {
    let mut seen = FxHashSet::default();
    let mut rng = BoardRng::new(99);
    for _ in 0..2_000 {
        let mut cards = [0u8, 1, 2, 3];
        rng.shuffle(&mut cards);
        seen.insert(cards);
    }
    assert_eq!(seen.len(), 24);
}
