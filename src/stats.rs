//! # Population Snapshots
//!
//! A [`PopulationSnapshot`] is the immutable per-generation (or, for island
//! runs, per-epoch) summary handed to observers and termination conditions.

use std::time::{Duration, Instant};

use crate::candidate::EvaluatedCandidate;
use crate::error::{GeneticError, Result};

/// Immutable statistics about one evaluated, sorted population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSnapshot<T> {
    population_id: String,
    best_candidate: T,
    best_fitness: f64,
    mean_fitness: f64,
    fitness_standard_deviation: f64,
    natural_fitness: bool,
    population_size: usize,
    elite_count: usize,
    generation_number: usize,
    elapsed: Duration,
}

impl<T: Clone> PopulationSnapshot<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        population_id: impl Into<String>,
        best_candidate: T,
        best_fitness: f64,
        mean_fitness: f64,
        fitness_standard_deviation: f64,
        natural_fitness: bool,
        population_size: usize,
        elite_count: usize,
        generation_number: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            population_id: population_id.into(),
            best_candidate,
            best_fitness,
            mean_fitness,
            fitness_standard_deviation,
            natural_fitness,
            population_size,
            elite_count,
            generation_number,
            elapsed,
        }
    }

    /// Summarises a population that is already sorted fittest first.
    ///
    /// The standard deviation is the population (not sample) deviation.
    pub fn from_sorted_population(
        population_id: &str,
        population: &[EvaluatedCandidate<T>],
        natural_fitness: bool,
        elite_count: usize,
        generation_number: usize,
        start_time: Instant,
    ) -> Result<Self> {
        let best = population.first().ok_or(GeneticError::EmptyPopulation)?;

        let size = population.len() as f64;
        let mean = population.iter().map(|c| c.fitness()).sum::<f64>() / size;
        let variance = population
            .iter()
            .map(|c| (c.fitness() - mean).powi(2))
            .sum::<f64>()
            / size;

        Ok(Self::new(
            population_id,
            best.candidate().clone(),
            best.fitness(),
            mean,
            variance.sqrt(),
            natural_fitness,
            population.len(),
            elite_count,
            generation_number,
            start_time.elapsed(),
        ))
    }
}

impl<T> PopulationSnapshot<T> {
    pub fn population_id(&self) -> &str {
        &self.population_id
    }

    pub fn best_candidate(&self) -> &T {
        &self.best_candidate
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn mean_fitness(&self) -> f64 {
        self.mean_fitness
    }

    pub fn fitness_standard_deviation(&self) -> f64 {
        self.fitness_standard_deviation
    }

    pub fn is_natural_fitness(&self) -> bool {
        self.natural_fitness
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Zero-based generation (or epoch) index.
    pub fn generation_number(&self) -> usize {
        self.generation_number
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time since the run started, in whole milliseconds.
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_of_sorted_population() {
        let population = vec![
            EvaluatedCandidate::new('a', 9.0),
            EvaluatedCandidate::new('b', 5.0),
            EvaluatedCandidate::new('c', 5.0),
            EvaluatedCandidate::new('d', 1.0),
        ];
        let snapshot =
            PopulationSnapshot::from_sorted_population("pop", &population, true, 1, 3, Instant::now())
                .unwrap();

        assert_eq!(snapshot.population_id(), "pop");
        assert_eq!(*snapshot.best_candidate(), 'a');
        assert_eq!(snapshot.best_fitness(), 9.0);
        assert_eq!(snapshot.mean_fitness(), 5.0);
        // Deviations: 4, 0, 0, -4 -> variance 8
        assert!((snapshot.fitness_standard_deviation() - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(snapshot.population_size(), 4);
        assert_eq!(snapshot.elite_count(), 1);
        assert_eq!(snapshot.generation_number(), 3);
        assert!(snapshot.is_natural_fitness());
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let population: Vec<EvaluatedCandidate<u8>> = Vec::new();
        let result =
            PopulationSnapshot::from_sorted_population("pop", &population, true, 0, 0, Instant::now());
        assert_eq!(result.unwrap_err(), GeneticError::EmptyPopulation);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serializes_fields() {
        let snapshot = PopulationSnapshot::new(
            "island-0",
            7_u32,
            3.5,
            2.0,
            0.5,
            true,
            10,
            2,
            4,
            Duration::from_millis(120),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["population_id"], "island-0");
        assert_eq!(json["best_candidate"], 7);
        assert_eq!(json["generation_number"], 4);
    }
}
