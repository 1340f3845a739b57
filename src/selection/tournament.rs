use rand::Rng;

use crate::candidate::{is_fitter, EvaluatedCandidate, Genotype};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each selection draws `tournament_size` individuals uniformly at random
/// (with replacement) and keeps the fittest of them. Smaller tournaments
/// favour exploration, larger ones exploitation. A tournament size of 1 is
/// uniform random selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        self.tournament_size = tournament_size;
        Ok(self)
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament<T>(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural_fitness: bool,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut best_idx = rng.gen_range(0..population.len());

        for _ in 1..self.tournament_size {
            let idx = rng.gen_range(0..population.len());
            if is_fitter(
                population[idx].fitness(),
                population[best_idx].fitness(),
                natural_fitness,
            ) {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl<T: Genotype> SelectionStrategy<T> for TournamentSelection {
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural_fitness: bool,
        selection_size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok((0..selection_size)
            .map(|_| {
                let winner = self.run_tournament(population, natural_fitness, rng);
                population[winner].candidate().clone()
            })
            .collect())
    }
}
