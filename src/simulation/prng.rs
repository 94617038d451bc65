//! Seeded random source used to pick outgoing roads

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::error::SimError;

/// Seed used when the caller does not pick one
pub const DEFAULT_SEED: u64 = 5;

/// A reproducible stream of uniform integers
#[derive(Debug, Clone)]
pub struct Prng {
    rng: StdRng,
}

impl Default for Prng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a value uniformly from `[0, bound)`
    pub fn from_zero_to(&mut self, bound: usize) -> Result<usize, SimError> {
        if bound == 0 {
            return Err(SimError::EmptyRange);
        }
        Ok(self.rng.random_range(0..bound))
    }
}
