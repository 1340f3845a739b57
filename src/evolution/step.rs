use crate::candidate::{EvaluatedCandidate, Genotype};
use crate::error::Result;
use crate::evaluation::scoring::Scoring;
use crate::evolution::options::EvolutionOptions;
use crate::rng::RandomNumberGenerator;

/// The variant-specific part of an engine: how one scored generation
/// becomes the next.
///
/// The engine drives the loop (initial population, sorting, statistics,
/// observers, termination); a step only produces the next population. The
/// returned population must have the same size as the one passed in, or the
/// engine fails the run with an `Evolution` error.
pub trait EvolutionStep<T: Genotype>: Send + Sync {
    /// A short name used in log events.
    fn name(&self) -> &'static str;

    /// Rejects option combinations this variant cannot run with. Called
    /// before any work starts.
    fn validate(&self, _options: &EvolutionOptions) -> Result<()> {
        Ok(())
    }

    /// Produces the next generation from `population`, which is sorted
    /// fittest first.
    fn next_generation(
        &self,
        population: Vec<EvaluatedCandidate<T>>,
        context: &mut StepContext<'_, T>,
    ) -> Result<Vec<EvaluatedCandidate<T>>>;
}

/// Per-generation services handed to an [`EvolutionStep`].
pub struct StepContext<'a, T: Genotype> {
    pub(crate) scoring: &'a dyn Scoring<T>,
    pub(crate) rng: &'a mut RandomNumberGenerator,
    pub(crate) population_id: &'a str,
    pub(crate) elite_count: usize,
    pub(crate) single_threaded: bool,
}

impl<'a, T: Genotype> StepContext<'a, T> {
    pub fn rng(&mut self) -> &mut RandomNumberGenerator {
        self.rng
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn is_natural(&self) -> bool {
        self.scoring.is_natural()
    }

    pub fn population_id(&self) -> &str {
        self.population_id
    }

    /// Expresses (if configured) and scores `candidates`, preserving order.
    pub fn evaluate(&self, candidates: &[T]) -> Result<Vec<EvaluatedCandidate<T>>> {
        self.scoring
            .score(candidates, self.population_id, self.single_threaded)
    }
}
