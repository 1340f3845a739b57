//! # CandidateFactory
//!
//! The `CandidateFactory` trait creates the initial population of a run.
//! Implementors only need to provide [`CandidateFactory::generate_random_candidate`];
//! the provided [`CandidateFactory::generate_initial_population`] places any
//! seed candidates first and fills the remainder with random candidates.
//!
//! ## Example
//!
//! ```rust
//! use islandga::factory::CandidateFactory;
//! use islandga::rng::RandomNumberGenerator;
//! use rand::Rng;
//!
//! struct DigitFactory;
//!
//! impl CandidateFactory<u8> for DigitFactory {
//!     fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> u8 {
//!         rng.gen_range(0..10)
//!     }
//! }
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let population = DigitFactory.generate_initial_population(5, &[42], &mut rng).unwrap();
//! assert_eq!(population.len(), 5);
//! assert_eq!(population[0], 42);
//! ```

use crate::candidate::Genotype;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Creates candidates for the initial population of a run.
pub trait CandidateFactory<T: Genotype>: Send + Sync {
    /// Creates a single random candidate.
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> T;

    /// Creates `population_size` candidates, seeds first.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if there are more seeds than
    /// `population_size`.
    fn generate_initial_population(
        &self,
        population_size: usize,
        seeds: &[T],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if seeds.len() > population_size {
            return Err(GeneticError::Configuration(format!(
                "Too many seed candidates ({}) for population size {}",
                seeds.len(),
                population_size
            )));
        }

        let mut population = Vec::with_capacity(population_size);
        population.extend_from_slice(seeds);
        while population.len() < population_size {
            population.push(self.generate_random_candidate(rng));
        }
        Ok(population)
    }
}
