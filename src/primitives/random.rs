//! Seeded random number generation.
//!
//! Randomized routines (Louvain visiting order, label propagation sweeps)
//! take a caller-owned `&mut R: Rng`. Builders that accept an optional
//! `seed` construct their generator through [`rng_from_seed`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Build a generator from an optional seed.
///
/// `Some(seed)` is reproducible across runs; `None` seeds from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Indices `0..n` in a random order drawn from `rng`.
pub fn shuffled_indices<R: rand::Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}
