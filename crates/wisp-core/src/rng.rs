//! Deterministic RNG wrapper.
//!
//! The only stochastic behavior in the engine is the idle-bounce delay.  A
//! seeded `SmallRng` keeps that reproducible: the same seed always yields the
//! same delay sequence, so idle-cycle tests assert exact values instead of
//! ranges.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Engine-level RNG, seeded once at construction.
pub struct MarkerRng(SmallRng);

impl MarkerRng {
    pub fn new(seed: u64) -> Self {
        MarkerRng(SmallRng::seed_from_u64(seed))
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
}
