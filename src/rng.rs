//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness handed
//! to every collaborator (candidate factories, selection strategies, operators,
//! migrations). It wraps the `rand` crate's `StdRng` and implements
//! [`RngCore`], so the whole [`rand::Rng`] API is available on it.
//!
//! ## Example
//!
//! ```rust
//! use islandga::rng::RandomNumberGenerator;
//! use rand::Rng;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let index = rng.gen_range(0..10);
//! assert!(index < 10);
//! ```

use rand::{rngs::StdRng, RngCore, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator seeded from this one.
    ///
    /// Used to hand each island its own stream while keeping a seeded
    /// coordinator reproducible.
    pub fn derive(&mut self) -> Self {
        Self::from_seed(self.rng.next_u64())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for RandomNumberGenerator {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
