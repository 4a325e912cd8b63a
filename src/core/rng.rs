//! Deterministic random number generation for board construction.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same boards
//! - **Context streams**: Independent sequences for pair-key draws and shuffling
//!
//! ```
//! use rust_pairs::core::BoardRng;
//!
//! let rng = BoardRng::new(42);
//! let mut keys = rng.for_context("pair_keys");
//! let mut order = rng.for_context("shuffle");
//!
//! // Streams are independent of each other but reproducible.
//! let mut again = BoardRng::new(42).for_context("pair_keys");
//! assert_eq!(keys.gen_range(0..1000), again.gen_range(0..1000));
//! let _ = order.gen_range(0..1000);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG used by the board pool.
///
/// Uses ChaCha8 for speed while keeping good statistical quality, so every
/// permutation of a shuffled board is equally likely.
#[derive(Clone, Debug)]
pub struct BoardRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BoardRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Draw an integer uniformly from `range`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut BoardRng, n: usize) -> Vec<i32> {
        (0..n).map(|_| rng.gen_range(1000..10_000)).collect()
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = draws(&mut BoardRng::new(42), 50);
        let b = draws(&mut BoardRng::new(42), 50);
        assert_eq!(a, b);
        assert!(a.iter().all(|k| (1000..10_000).contains(k)));
        assert_ne!(a, draws(&mut BoardRng::new(43), 50));
    }

    #[test]
    fn test_context_streams_are_independent() {
        let rng = BoardRng::new(42);
        let keys = draws(&mut rng.for_context("pair_keys"), 10);
        let order = draws(&mut rng.for_context("shuffle"), 10);
        assert_ne!(keys, order);

        // Drawing from one stream does not disturb the other.
        let mut again = rng.for_context("pair_keys");
        let _ = draws(&mut rng.for_context("shuffle"), 100);
        assert_eq!(draws(&mut again, 10), keys);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = BoardRng::new(42);
        let original: Vec<i32> = (1..=10).collect();
        let mut cards = original.clone();

        rng.shuffle(&mut cards);
        assert_ne!(cards, original);

        cards.sort_unstable();
        assert_eq!(cards, original);
    }

    #[test]
    fn test_shuffle_covers_every_permutation() {
        // 3 elements -> 6 permutations, each should show up.
        let mut rng = BoardRng::new(7);
        let mut seen = rustc_hash::FxHashSet::default();
        for _ in 0..600 {
            let mut data = [0u8, 1, 2];
            rng.shuffle(&mut data);
            seen.insert(data);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = BoardRng::new(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);

        let mut one = [9];
        rng.shuffle(&mut one);
        assert_eq!(one, [9]);
    }
}
