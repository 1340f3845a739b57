use std::sync::{Mutex, PoisonError};

use super::TerminationCondition;
use crate::candidate::is_fitter;
use crate::error::{GeneticError, Result};
use crate::stats::PopulationSnapshot;

#[derive(Debug, Default)]
struct StagnationState {
    best_seen: Option<f64>,
    generations_since_improvement: usize,
}

/// Terminates once fitness has not improved for a number of consecutive
/// generations.
///
/// By default the best fitness of each snapshot is tracked; the mean fitness
/// can be tracked instead. Improvement is judged in the snapshot's fitness
/// direction. The tracking state lives for the lifetime of the condition.
#[derive(Debug)]
pub struct Stagnation {
    generation_limit: usize,
    use_population_mean: bool,
    state: Mutex<StagnationState>,
}

impl Stagnation {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `generation_limit` is zero.
    pub fn new(generation_limit: usize) -> Result<Self> {
        Self::build(generation_limit, false)
    }

    /// Tracks the population's mean fitness rather than its best fitness.
    pub fn on_mean_fitness(generation_limit: usize) -> Result<Self> {
        Self::build(generation_limit, true)
    }

    fn build(generation_limit: usize, use_population_mean: bool) -> Result<Self> {
        if generation_limit == 0 {
            return Err(GeneticError::Configuration(
                "Stagnation generation limit must be positive".to_string(),
            ));
        }
        Ok(Self {
            generation_limit,
            use_population_mean,
            state: Mutex::new(StagnationState::default()),
        })
    }

    pub fn generation_limit(&self) -> usize {
        self.generation_limit
    }
}

impl<T> TerminationCondition<T> for Stagnation {
    fn should_terminate(&self, snapshot: &PopulationSnapshot<T>) -> bool {
        let fitness = if self.use_population_mean {
            snapshot.mean_fitness()
        } else {
            snapshot.best_fitness()
        };

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let best_seen = state.best_seen;
        match best_seen {
            Some(best) if !is_fitter(fitness, best, snapshot.is_natural_fitness()) => {
                state.generations_since_improvement += 1;
            }
            _ => {
                state.best_seen = Some(fitness);
                state.generations_since_improvement = 0;
            }
        }

        state.generations_since_improvement >= self.generation_limit
    }
}
