//! # Candidate Model
//!
//! Value types shared by every engine: the opaque genotype bound, the
//! expressed (phenotype) form of a genotype, and the scored individual that
//! engines sort, select from and return.
//!
//! ## Example
//!
//! ```rust
//! use islandga::candidate::{sort_evaluated_population, EvaluatedCandidate};
//!
//! let mut population = vec![
//!     EvaluatedCandidate::new("b", 1.0),
//!     EvaluatedCandidate::new("a", 3.0),
//!     EvaluatedCandidate::new("c", 2.0),
//! ];
//!
//! // Natural fitness: higher is fitter, so the population is sorted descending.
//! sort_evaluated_population(&mut population, true);
//! assert_eq!(population[0].candidate(), &"a");
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound satisfied by every type an engine can evolve.
///
/// Engines never inspect a genotype; they only clone it, move it between
/// threads and hand it to the external collaborators.
pub trait Genotype: Clone + Debug + Send + Sync + 'static {}

impl<T> Genotype for T where T: Clone + Debug + Send + Sync + 'static {}

/// The expressed form of a genotype, produced by an
/// [`ExpressionStrategy`](crate::fitness::ExpressionStrategy).
///
/// Phenotypes are totally ordered consistently with equality: equal
/// phenotypes compare `Equal` and hash equal.
pub trait ExpressedCandidate<T>: Ord + Hash + Clone + Debug + Send + Sync {
    /// The genotype this phenotype was expressed from.
    fn genome(&self) -> &T;
}

/// A candidate together with its fitness score.
///
/// Fitness evaluators are expected to return non-negative finite scores. The
/// engines reject non-finite scores but do not check the sign.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedCandidate<T> {
    candidate: T,
    fitness: f64,
}

impl<T> EvaluatedCandidate<T> {
    pub fn new(candidate: T, fitness: f64) -> Self {
        Self { candidate, fitness }
    }

    pub fn candidate(&self) -> &T {
        &self.candidate
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_candidate(self) -> T {
        self.candidate
    }

    /// Compares two individuals so that the fitter one orders first.
    pub fn fitter_first(&self, other: &Self, natural_fitness: bool) -> Ordering {
        compare_fitness(self.fitness, other.fitness, natural_fitness)
    }
}

/// Orders two scores so that the fitter score comes first.
///
/// With natural fitness higher scores are fitter; otherwise lower scores are.
pub fn compare_fitness(a: f64, b: f64, natural_fitness: bool) -> Ordering {
    if natural_fitness {
        b.total_cmp(&a)
    } else {
        a.total_cmp(&b)
    }
}

/// Returns true when `candidate` is strictly fitter than `reference`.
pub fn is_fitter(candidate: f64, reference: f64, natural_fitness: bool) -> bool {
    compare_fitness(candidate, reference, natural_fitness) == Ordering::Less
}

/// Sorts a population fittest first.
///
/// The sort is stable: individuals with equal fitness keep their relative
/// order.
pub fn sort_evaluated_population<T>(population: &mut [EvaluatedCandidate<T>], natural_fitness: bool) {
    population.sort_by(|a, b| a.fitter_first(b, natural_fitness));
}
