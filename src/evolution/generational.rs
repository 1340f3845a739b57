use std::sync::Arc;

use tracing::trace;

use super::step::{EvolutionStep, StepContext};
use crate::candidate::{EvaluatedCandidate, Genotype};
use crate::error::Result;
use crate::operators::EvolutionaryOperator;
use crate::selection::SelectionStrategy;

/// Replaces the whole population every generation.
///
/// The fittest `elite_count` individuals are copied forward untouched; the
/// remaining slots are filled by selecting parents and applying the
/// operator. The complete new generation, elite included, is re-scored.
pub struct GenerationalEvolution<T: Genotype> {
    operator: Arc<dyn EvolutionaryOperator<T>>,
    selection: Arc<dyn SelectionStrategy<T>>,
}

impl<T: Genotype> GenerationalEvolution<T> {
    pub fn new(
        operator: impl EvolutionaryOperator<T> + 'static,
        selection: impl SelectionStrategy<T> + 'static,
    ) -> Self {
        Self {
            operator: Arc::new(operator),
            selection: Arc::new(selection),
        }
    }
}

impl<T: Genotype> Clone for GenerationalEvolution<T> {
    fn clone(&self) -> Self {
        Self {
            operator: Arc::clone(&self.operator),
            selection: Arc::clone(&self.selection),
        }
    }
}

impl<T: Genotype> EvolutionStep<T> for GenerationalEvolution<T> {
    fn name(&self) -> &'static str {
        "generational"
    }

    fn next_generation(
        &self,
        population: Vec<EvaluatedCandidate<T>>,
        context: &mut StepContext<'_, T>,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        let elite_count = context.elite_count();
        let natural = context.is_natural();

        let elite: Vec<T> = population
            .iter()
            .take(elite_count)
            .map(|individual| individual.candidate().clone())
            .collect();

        let selected = self.selection.select(
            &population,
            natural,
            population.len() - elite.len(),
            context.rng(),
        )?;
        let mut next = self.operator.apply(selected, context.rng());
        trace!(offspring = next.len(), elite = elite.len(), "Bred generation");
        next.extend(elite);

        context.evaluate(&next)
    }
}
