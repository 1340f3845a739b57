use std::fmt::Debug;

use crate::candidate::{EvaluatedCandidate, Genotype};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies choose which candidates of an evaluated population
/// are handed to the evolutionary operators. The same candidate may be
/// selected more than once.
///
/// # Examples
///
/// ```
/// use islandga::candidate::EvaluatedCandidate;
/// use islandga::error::Result;
/// use islandga::rng::RandomNumberGenerator;
/// use islandga::selection::{SelectionStrategy, TournamentSelection};
///
/// fn main() -> Result<()> {
///     let population = vec![
///         EvaluatedCandidate::new(3, 3.0),
///         EvaluatedCandidate::new(2, 2.0),
///         EvaluatedCandidate::new(1, 1.0),
///     ];
///     let mut rng = RandomNumberGenerator::from_seed(5);
///
///     let selection = TournamentSelection::new(2)?;
///     let selected = selection.select(&population, true, 4, &mut rng)?;
///
///     assert_eq!(selected.len(), 4);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<T: Genotype>: Debug + Send + Sync {
    /// Selects `selection_size` candidates from `population`.
    ///
    /// # Arguments
    ///
    /// * `population` - The evaluated population, sorted fittest first.
    /// * `natural_fitness` - Whether higher scores are fitter.
    /// * `selection_size` - The number of candidates to select.
    /// * `rng` - The source of randomness.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty.
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural_fitness: bool,
        selection_size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>>;
}
