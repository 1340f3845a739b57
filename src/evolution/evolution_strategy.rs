use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::options::EvolutionOptions;
use super::step::{EvolutionStep, StepContext};
use crate::candidate::{sort_evaluated_population, EvaluatedCandidate, Genotype};
use crate::error::{GeneticError, Result};
use crate::operators::EvolutionaryOperator;

/// A (μ+λ) or (μ,λ) evolution strategy.
///
/// Each generation draws `offspring_multiplier * μ` parents uniformly with
/// replacement, applies the operator and scores the offspring. With plus
/// selection the parents compete with their offspring (their scores are
/// reused, not recomputed); otherwise only offspring are eligible. The
/// fittest μ survive.
///
/// Explicit elitism is rejected: plus selection already keeps good parents.
pub struct EvolutionStrategy<T: Genotype> {
    operator: Arc<dyn EvolutionaryOperator<T>>,
    plus_selection: bool,
    offspring_multiplier: usize,
}

impl<T: Genotype> EvolutionStrategy<T> {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `offspring_multiplier` is zero.
    pub fn new(
        operator: impl EvolutionaryOperator<T> + 'static,
        plus_selection: bool,
        offspring_multiplier: usize,
    ) -> Result<Self> {
        if offspring_multiplier == 0 {
            return Err(GeneticError::Configuration(
                "Offspring multiplier must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            operator: Arc::new(operator),
            plus_selection,
            offspring_multiplier,
        })
    }

    pub fn is_plus_selection(&self) -> bool {
        self.plus_selection
    }

    pub fn offspring_multiplier(&self) -> usize {
        self.offspring_multiplier
    }
}

impl<T: Genotype> Clone for EvolutionStrategy<T> {
    fn clone(&self) -> Self {
        Self {
            operator: Arc::clone(&self.operator),
            plus_selection: self.plus_selection,
            offspring_multiplier: self.offspring_multiplier,
        }
    }
}

impl<T: Genotype> EvolutionStep<T> for EvolutionStrategy<T> {
    fn name(&self) -> &'static str {
        if self.plus_selection {
            "evolution-strategy(plus)"
        } else {
            "evolution-strategy(comma)"
        }
    }

    fn validate(&self, options: &EvolutionOptions) -> Result<()> {
        if options.get_elite_count() != 0 {
            return Err(GeneticError::Configuration(format!(
                "Evolution strategy does not support elitism (elite count {})",
                options.get_elite_count()
            )));
        }
        Ok(())
    }

    fn next_generation(
        &self,
        population: Vec<EvaluatedCandidate<T>>,
        context: &mut StepContext<'_, T>,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        let mu = population.len();
        let natural = context.is_natural();

        let parents: Vec<T> = (0..self.offspring_multiplier * mu)
            .map(|_| {
                let index = context.rng().gen_range(0..mu);
                population[index].candidate().clone()
            })
            .collect();
        let offspring = self.operator.apply(parents, context.rng());
        let mut pool = context.evaluate(&offspring)?;

        if self.plus_selection {
            pool.extend(population);
        }

        if pool.len() < mu {
            return Err(GeneticError::Evolution(format!(
                "Only {} candidates available to fill a population of {}",
                pool.len(),
                mu
            )));
        }

        trace!(pool = pool.len(), survivors = mu, "Truncating to survivors");
        sort_evaluated_population(&mut pool, natural);
        pool.truncate(mu);
        Ok(pool)
    }
}
