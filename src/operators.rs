//! # Evolutionary Operators
//!
//! An [`EvolutionaryOperator`] transforms a batch of selected genotypes into
//! a batch of offspring. [`EvolutionPipeline`] chains several operators into
//! one evolution scheme.

use crate::candidate::Genotype;
use crate::rng::RandomNumberGenerator;

/// Transforms a batch of candidates.
///
/// The returned batch may differ in size from the input if the operator's
/// contract says so. Engines never mutate candidates in place; operators
/// receive owned values and return new ones.
pub trait EvolutionaryOperator<T: Genotype>: Send + Sync {
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Vec<T>;
}

/// Applies a sequence of operators, feeding each one's output to the next.
pub struct EvolutionPipeline<T: Genotype> {
    operators: Vec<Box<dyn EvolutionaryOperator<T>>>,
}

impl<T: Genotype> EvolutionPipeline<T> {
    pub fn new(operators: Vec<Box<dyn EvolutionaryOperator<T>>>) -> Self {
        Self { operators }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<T: Genotype> EvolutionaryOperator<T> for EvolutionPipeline<T> {
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Vec<T> {
        self.operators
            .iter()
            .fold(selected, |batch, operator| operator.apply(batch, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AddOne;

    impl EvolutionaryOperator<i32> for AddOne {
        fn apply(&self, selected: Vec<i32>, _rng: &mut RandomNumberGenerator) -> Vec<i32> {
            selected.into_iter().map(|x| x + 1).collect()
        }
    }

    struct Double;

    impl EvolutionaryOperator<i32> for Double {
        fn apply(&self, selected: Vec<i32>, _rng: &mut RandomNumberGenerator) -> Vec<i32> {
            selected.into_iter().map(|x| x * 2).collect()
        }
    }

    #[test]
    fn test_pipeline_applies_in_order() {
        let pipeline = EvolutionPipeline::new(vec![Box::new(AddOne), Box::new(Double)]);
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert_eq!(pipeline.apply(vec![1, 2, 3], &mut rng), vec![4, 6, 8]);
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline: EvolutionPipeline<i32> = EvolutionPipeline::new(Vec::new());
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(vec![5, 6], &mut rng), vec![5, 6]);
    }
}
