use std::sync::Arc;

use super::engine::EvolutionEngine;
use super::step::EvolutionStep;
use crate::candidate::{ExpressedCandidate, Genotype};
use crate::error::{GeneticError, Result};
use crate::evaluation::scoring::{DirectScoring, ExpressedScoring, Scoring};
use crate::factory::CandidateFactory;
use crate::fitness::{ExpressedFitnessEvaluator, ExpressionStrategy, FitnessEvaluator};
use crate::rng::RandomNumberGenerator;

/// Assembles an [`EvolutionEngine`].
///
/// A candidate factory, a way of scoring (a plain fitness evaluator or an
/// expression strategy paired with an evaluator of expressed candidates) and
/// an evolution step are required. The random number generator defaults to
/// an entropy-seeded one.
///
/// The builder is cheap to clone: collaborators are shared, so one builder
/// can produce many engines (for example one per island) that differ only in
/// their random number generator.
pub struct EvolutionEngineBuilder<T: Genotype> {
    candidate_factory: Option<Arc<dyn CandidateFactory<T>>>,
    scoring: Option<Arc<dyn Scoring<T>>>,
    step: Option<Arc<dyn EvolutionStep<T>>>,
    rng: Option<RandomNumberGenerator>,
}

impl<T: Genotype> EvolutionEngineBuilder<T> {
    pub fn new() -> Self {
        Self {
            candidate_factory: None,
            scoring: None,
            step: None,
            rng: None,
        }
    }

    pub fn with_candidate_factory(mut self, factory: impl CandidateFactory<T> + 'static) -> Self {
        self.candidate_factory = Some(Arc::new(factory));
        self
    }

    /// Scores genotypes directly, without an expression step.
    pub fn with_fitness_evaluator(mut self, evaluator: impl FitnessEvaluator<T> + 'static) -> Self {
        let evaluator: Arc<dyn FitnessEvaluator<T>> = Arc::new(evaluator);
        self.scoring = Some(Arc::new(DirectScoring::new(evaluator)));
        self
    }

    /// Expresses every genotype before scoring it. Replaces any fitness
    /// evaluator set earlier.
    pub fn with_expression<P>(
        mut self,
        strategy: impl ExpressionStrategy<T, P> + 'static,
        evaluator: impl ExpressedFitnessEvaluator<P> + 'static,
    ) -> Self
    where
        P: ExpressedCandidate<T> + 'static,
    {
        let strategy: Arc<dyn ExpressionStrategy<T, P>> = Arc::new(strategy);
        let evaluator: Arc<dyn ExpressedFitnessEvaluator<P>> = Arc::new(evaluator);
        self.scoring = Some(Arc::new(ExpressedScoring::new(strategy, evaluator)));
        self
    }

    /// Sets the variant: generational, steady-state or an evolution strategy.
    pub fn with_step(mut self, step: impl EvolutionStep<T> + 'static) -> Self {
        self.step = Some(Arc::new(step));
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(RandomNumberGenerator::from_seed(seed))
    }

    pub fn build(self) -> Result<EvolutionEngine<T>> {
        let candidate_factory = self.candidate_factory.ok_or_else(|| {
            GeneticError::Configuration("Candidate factory not specified".to_string())
        })?;

        let scoring = self.scoring.ok_or_else(|| {
            GeneticError::Configuration("Fitness evaluator not specified".to_string())
        })?;

        let step = self
            .step
            .ok_or_else(|| GeneticError::Configuration("Evolution step not specified".to_string()))?;

        Ok(EvolutionEngine::new(
            candidate_factory,
            scoring,
            step,
            self.rng.unwrap_or_default(),
        ))
    }
}

impl<T: Genotype> Clone for EvolutionEngineBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            candidate_factory: self.candidate_factory.clone(),
            scoring: self.scoring.clone(),
            step: self.step.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<T: Genotype> Default for EvolutionEngineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::generational::GenerationalEvolution;
    use crate::operators::EvolutionaryOperator;
    use crate::selection::TournamentSelection;

    struct Zeros;

    impl CandidateFactory<u8> for Zeros {
        fn generate_random_candidate(&self, _rng: &mut RandomNumberGenerator) -> u8 {
            0
        }
    }

    struct Unit;

    impl FitnessEvaluator<u8> for Unit {
        fn fitness(&self, _candidate: &u8, _population: &[u8]) -> f64 {
            1.0
        }

        fn is_natural(&self) -> bool {
            false
        }
    }

    struct Keep;

    impl EvolutionaryOperator<u8> for Keep {
        fn apply(&self, selected: Vec<u8>, _rng: &mut RandomNumberGenerator) -> Vec<u8> {
            selected
        }
    }

    #[test]
    fn test_missing_pieces_are_configuration_errors() {
        let missing_factory = EvolutionEngineBuilder::<u8>::new()
            .with_fitness_evaluator(Unit)
            .with_step(GenerationalEvolution::new(Keep, TournamentSelection::default()))
            .build();
        assert!(matches!(missing_factory, Err(GeneticError::Configuration(_))));

        let missing_evaluator = EvolutionEngineBuilder::<u8>::new()
            .with_candidate_factory(Zeros)
            .with_step(GenerationalEvolution::new(Keep, TournamentSelection::default()))
            .build();
        assert!(matches!(missing_evaluator, Err(GeneticError::Configuration(_))));

        let missing_step = EvolutionEngineBuilder::<u8>::new()
            .with_candidate_factory(Zeros)
            .with_fitness_evaluator(Unit)
            .build();
        assert!(matches!(missing_step, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_clone_shares_collaborators() {
        let builder = EvolutionEngineBuilder::<u8>::new()
            .with_candidate_factory(Zeros)
            .with_fitness_evaluator(Unit)
            .with_step(GenerationalEvolution::new(Keep, TournamentSelection::default()));

        let first = builder.clone().with_seed(1).build().unwrap();
        let second = builder.with_seed(2).build().unwrap();
        assert!(!first.is_natural());
        assert!(!second.is_natural());
    }
}
