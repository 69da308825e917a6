//! The simulation-wide deterministic RNG.
//!
//! Unlike the per-agent-RNG approach used by population-scale digital twins,
//! a ring election has no parallel phase and no need to isolate one agent's
//! randomness from another's: the whole tick loop is single-threaded (see
//! `ring-sim`). A single seeded `SmallRng` therefore drives every random
//! choice in a run — starter selection, malicious-node sampling, commit
//! values, and async message delay — and the run is fully reproducible from
//! `seed` alone.

use rand::rngs::SmallRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};

/// The single seeded RNG for one simulation run.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed a fresh RNG from the run's configured seed.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a uniformly random index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    pub fn choose_index(&mut self, len: usize) -> usize {
        (0..len).choose(&mut self.0).expect("len must be > 0")
    }

    /// Sample `k` distinct indices from `0..n` without replacement.
    ///
    /// Used to pick the malicious-agent set: `k` is clamped to `n` by the
    /// caller (`RingConfig` validation guarantees `k <= n`).
    pub fn sample_without_replacement(&mut self, n: usize, k: usize) -> Vec<usize> {
        (0..n).choose_multiple(&mut self.0, k)
    }

    /// Shuffle a mutable slice in place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
