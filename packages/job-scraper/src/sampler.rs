//! Uniform sampling without replacement.

use rand::{rngs::StdRng, seq::index, SeedableRng};
use tracing::debug;

/// Bounds a qualified set to at most `k` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    k: usize,
    seed: Option<u64>,
}

impl Sampler {
    /// Sample with a fresh entropy-seeded RNG on every call.
    pub fn new(k: usize) -> Self {
        Self { k, seed: None }
    }

    /// Sample reproducibly: the same seed and input give the same subset.
    pub fn seeded(k: usize, seed: u64) -> Self {
        Self { k, seed: Some(seed) }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Pick `min(len, k)` items uniformly at random.
    ///
    /// When there are no more than `k` items they are returned unchanged.
    /// Otherwise the chosen items keep their relative input order.
    pub fn sample<T>(&self, items: Vec<T>) -> Vec<T> {
        let len = items.len();
        if len <= self.k {
            return items;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut chosen = index::sample(&mut rng, len, self.k).into_vec();
        chosen.sort_unstable();

        let mut chosen = chosen.into_iter().peekable();
        let sampled: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| {
                if chosen.peek() == Some(&i) {
                    chosen.next();
                    Some(item)
                } else {
                    None
                }
            })
            .collect();

        debug!(stage = "sample", from = len, kept = sampled.len(), "Sampled records");
        sampled
    }
}
