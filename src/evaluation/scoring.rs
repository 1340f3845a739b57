//! Turns a batch of genotypes into scored individuals, with or without an
//! expression step.

use std::sync::Arc;

use tracing::trace;

use super::pool::run_batch;
use crate::candidate::{EvaluatedCandidate, ExpressedCandidate, Genotype};
use crate::error::{GeneticError, Result};
use crate::fitness::{ExpressedFitnessEvaluator, ExpressionStrategy, FitnessEvaluator};

pub(crate) trait Scoring<T: Genotype>: Send + Sync {
    fn is_natural(&self) -> bool;

    /// Scores `population` in order. Each task sees the whole batch as its
    /// read-only population context.
    fn score(
        &self,
        population: &[T],
        population_id: &str,
        single_threaded: bool,
    ) -> Result<Vec<EvaluatedCandidate<T>>>;
}

fn checked(score: f64) -> Result<f64> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(GeneticError::Evaluation(format!(
            "Non-finite fitness score encountered: {}",
            score
        )))
    }
}

pub(crate) struct DirectScoring<T> {
    evaluator: Arc<dyn FitnessEvaluator<T>>,
}

impl<T> DirectScoring<T> {
    pub(crate) fn new(evaluator: Arc<dyn FitnessEvaluator<T>>) -> Self {
        Self { evaluator }
    }
}

impl<T: Genotype> Scoring<T> for DirectScoring<T> {
    fn is_natural(&self) -> bool {
        self.evaluator.is_natural()
    }

    fn score(
        &self,
        population: &[T],
        _population_id: &str,
        single_threaded: bool,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        run_batch(single_threaded, population, |candidate| {
            let fitness = checked(self.evaluator.fitness(candidate, population))?;
            Ok(EvaluatedCandidate::new(candidate.clone(), fitness))
        })
    }
}

pub(crate) struct ExpressedScoring<T, P> {
    expression: Arc<dyn ExpressionStrategy<T, P>>,
    evaluator: Arc<dyn ExpressedFitnessEvaluator<P>>,
}

impl<T, P> ExpressedScoring<T, P> {
    pub(crate) fn new(
        expression: Arc<dyn ExpressionStrategy<T, P>>,
        evaluator: Arc<dyn ExpressedFitnessEvaluator<P>>,
    ) -> Self {
        Self {
            expression,
            evaluator,
        }
    }
}

impl<T, P> Scoring<T> for ExpressedScoring<T, P>
where
    T: Genotype,
    P: ExpressedCandidate<T> + 'static,
{
    fn is_natural(&self) -> bool {
        self.evaluator.is_natural()
    }

    fn score(
        &self,
        population: &[T],
        population_id: &str,
        single_threaded: bool,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        let phenotypes = run_batch(single_threaded, population, |candidate| {
            Ok(self.expression.express(candidate, population_id))
        })?;
        trace!(population_id, expressed = phenotypes.len(), "Expressed batch");
        self.expression.candidates_expressed(&phenotypes, population_id);

        run_batch(single_threaded, &phenotypes, |phenotype| {
            let fitness = checked(self.evaluator.fitness(phenotype, &phenotypes))?;
            Ok(EvaluatedCandidate::new(phenotype.genome().clone(), fitness))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Identity;

    impl FitnessEvaluator<u32> for Identity {
        fn fitness(&self, candidate: &u32, _population: &[u32]) -> f64 {
            *candidate as f64
        }

        fn is_natural(&self) -> bool {
            true
        }
    }

    struct RelativeToTotal;

    impl FitnessEvaluator<u32> for RelativeToTotal {
        fn fitness(&self, candidate: &u32, population: &[u32]) -> f64 {
            *candidate as f64 / population.iter().sum::<u32>() as f64
        }

        fn is_natural(&self) -> bool {
            true
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct Squared {
        genome: u32,
        value: u64,
    }

    impl ExpressedCandidate<u32> for Squared {
        fn genome(&self) -> &u32 {
            &self.genome
        }
    }

    #[derive(Default)]
    struct Squaring {
        batches: Mutex<Vec<usize>>,
    }

    impl ExpressionStrategy<u32, Squared> for Squaring {
        fn express(&self, candidate: &u32, _population_id: &str) -> Squared {
            Squared {
                genome: *candidate,
                value: (*candidate as u64).pow(2),
            }
        }

        fn candidates_expressed(&self, expressed: &[Squared], _population_id: &str) {
            self.batches.lock().unwrap().push(expressed.len());
        }
    }

    struct SquaredValue;

    impl ExpressedFitnessEvaluator<Squared> for SquaredValue {
        fn fitness(&self, candidate: &Squared, _population: &[Squared]) -> f64 {
            candidate.value as f64
        }

        fn is_natural(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_direct_scoring_keeps_order() {
        let scoring: DirectScoring<u32> = DirectScoring::new(Arc::new(Identity));
        let scored = scoring.score(&[3, 1, 2], "p", false).unwrap();
        let fitness: Vec<f64> = scored.iter().map(|c| c.fitness()).collect();
        assert_eq!(fitness, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_population_context_is_whole_batch() {
        let scoring: DirectScoring<u32> = DirectScoring::new(Arc::new(RelativeToTotal));
        let scored = scoring.score(&[1, 3], "p", true).unwrap();
        assert_eq!(scored[0].fitness(), 0.25);
        assert_eq!(scored[1].fitness(), 0.75);
    }

    #[test]
    fn test_expressed_scoring() {
        let expression = Arc::new(Squaring::default());
        let scoring: ExpressedScoring<u32, Squared> =
            ExpressedScoring::new(expression.clone(), Arc::new(SquaredValue));
        assert!(!scoring.is_natural());

        let scored = scoring.score(&[2, 3], "p", true).unwrap();
        assert_eq!(*scored[0].candidate(), 2);
        assert_eq!(scored[0].fitness(), 4.0);
        assert_eq!(scored[1].fitness(), 9.0);
        assert_eq!(*expression.batches.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_non_finite_score_is_evaluation_failure() {
        struct Broken;

        impl FitnessEvaluator<u32> for Broken {
            fn fitness(&self, _candidate: &u32, _population: &[u32]) -> f64 {
                f64::NAN
            }

            fn is_natural(&self) -> bool {
                true
            }
        }

        let scoring: DirectScoring<u32> = DirectScoring::new(Arc::new(Broken));
        assert!(matches!(
            scoring.score(&[1], "p", true),
            Err(GeneticError::Evaluation(_))
        ));
    }
}
