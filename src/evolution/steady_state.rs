use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::step::{EvolutionStep, StepContext};
use crate::candidate::{EvaluatedCandidate, Genotype};
use crate::error::{GeneticError, Result};
use crate::operators::EvolutionaryOperator;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

/// Replaces a few individuals per generation.
///
/// Each generation selects `selection_size` parents, applies the operator
/// and scores only the offspring. Every offspring then overwrites a random
/// slot outside the elite prefix. With `force_single_candidate_update` a
/// single randomly chosen offspring is kept and the rest are discarded
/// before scoring.
pub struct SteadyStateEvolution<T: Genotype> {
    operator: Arc<dyn EvolutionaryOperator<T>>,
    selection: Arc<dyn SelectionStrategy<T>>,
    selection_size: usize,
    force_single_candidate_update: bool,
}

impl<T: Genotype> SteadyStateEvolution<T> {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `selection_size` is zero.
    pub fn new(
        operator: impl EvolutionaryOperator<T> + 'static,
        selection: impl SelectionStrategy<T> + 'static,
        selection_size: usize,
        force_single_candidate_update: bool,
    ) -> Result<Self> {
        if selection_size == 0 {
            return Err(GeneticError::Configuration(
                "Steady-state selection size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            operator: Arc::new(operator),
            selection: Arc::new(selection),
            selection_size,
            force_single_candidate_update,
        })
    }

    pub fn selection_size(&self) -> usize {
        self.selection_size
    }

    pub fn forces_single_candidate_update(&self) -> bool {
        self.force_single_candidate_update
    }

    fn replace(
        population: &mut [EvaluatedCandidate<T>],
        offspring: Vec<EvaluatedCandidate<T>>,
        elite_count: usize,
        rng: &mut RandomNumberGenerator,
    ) {
        for individual in offspring {
            let slot = rng.gen_range(elite_count..population.len());
            population[slot] = individual;
        }
    }
}

impl<T: Genotype> Clone for SteadyStateEvolution<T> {
    fn clone(&self) -> Self {
        Self {
            operator: Arc::clone(&self.operator),
            selection: Arc::clone(&self.selection),
            selection_size: self.selection_size,
            force_single_candidate_update: self.force_single_candidate_update,
        }
    }
}

impl<T: Genotype> EvolutionStep<T> for SteadyStateEvolution<T> {
    fn name(&self) -> &'static str {
        "steady-state"
    }

    fn next_generation(
        &self,
        mut population: Vec<EvaluatedCandidate<T>>,
        context: &mut StepContext<'_, T>,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        let natural = context.is_natural();
        let elite_count = context.elite_count();

        let selected =
            self.selection
                .select(&population, natural, self.selection_size, context.rng())?;
        let mut offspring = self.operator.apply(selected, context.rng());

        if self.force_single_candidate_update && offspring.len() > 1 {
            let keep = context.rng().gen_range(0..offspring.len());
            offspring = vec![offspring.swap_remove(keep)];
        }

        let scored = context.evaluate(&offspring)?;
        trace!(replaced = scored.len(), "Replacing individuals");
        Self::replace(&mut population, scored, elite_count, context.rng());

        Ok(population)
    }
}
