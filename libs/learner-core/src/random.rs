//! Injectable randomness for question generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of random draws used by the exercise engine.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// `amount` distinct indices from `0..len` in random order.
    /// `amount` must not exceed `len`.
    fn pick_distinct(&mut self, len: usize, amount: usize) -> Vec<usize>;

    /// Shuffle indices in place.
    fn shuffle(&mut self, indices: &mut [usize]);

    /// Fair coin.
    fn coin_flip(&mut self) -> bool;

    /// A random ordering of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.shuffle(&mut order);
        order
    }
}

/// Copy of `items` in random order.
pub fn shuffled<T: Clone>(rng: &mut dyn RandomSource, items: &[T]) -> Vec<T> {
    rng.permutation(items.len())
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// `rand`-backed source.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn pick_distinct(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount).into_vec()
    }

    fn shuffle(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut self.rng);
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
