//! Fitness evaluation and expression interfaces.
//!
//! A run is configured either with a [`FitnessEvaluator`] that scores raw
//! genotypes, or with an [`ExpressionStrategy`] plus an
//! [`ExpressedFitnessEvaluator`] that scores the expressed phenotypes.

use crate::candidate::ExpressedCandidate;

/// Scores raw genotypes.
///
/// Implementations are called concurrently from the evaluation pool and must
/// not rely on the order in which candidates are scored. Scores must be
/// finite and non-negative.
pub trait FitnessEvaluator<T>: Send + Sync {
    /// Scores `candidate`. `population` is the whole batch being evaluated,
    /// for fitness functions that depend on the rest of the population.
    fn fitness(&self, candidate: &T, population: &[T]) -> f64;

    /// Whether higher scores are fitter.
    fn is_natural(&self) -> bool;
}

/// Turns genotypes into phenotypes before they are scored.
pub trait ExpressionStrategy<T, P>: Send + Sync
where
    P: ExpressedCandidate<T>,
{
    fn express(&self, candidate: &T, population_id: &str) -> P;

    /// Called once per expressed batch, after every candidate in it has been
    /// expressed.
    fn candidates_expressed(&self, _expressed: &[P], _population_id: &str) {}
}

/// Scores expressed phenotypes.
pub trait ExpressedFitnessEvaluator<P>: Send + Sync {
    fn fitness(&self, candidate: &P, population: &[P]) -> f64;

    fn is_natural(&self) -> bool;
}
