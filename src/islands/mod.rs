//! # Island Evolution
//!
//! Runs several engines ("islands") side by side. Each epoch every island
//! evolves its own population for `epoch_length` generations, concurrently
//! with the others. The coordinator then combines all island populations,
//! summarises them, notifies its observers and checks the global termination
//! conditions. If the run continues, a [`Migration`] policy exchanges
//! individuals between the islands and each island's population seeds its
//! next epoch.
//!
//! Island observers receive every per-generation update of every island
//! tagged with the island index, plus the per-epoch aggregate update. The
//! aggregate snapshot describes the combined population, so its size and
//! elite count are the per-island values times the number of islands.

pub mod migration;
pub mod options;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::candidate::{sort_evaluated_population, EvaluatedCandidate, Genotype};
use crate::error::{GeneticError, OptionExt, Result, ResultExt};
use crate::evolution::engine::{cancelled_of, satisfied_of, RunOutcome};
use crate::evolution::options::LogLevel;
use crate::evolution::{EvolutionEngine, EvolutionEngineBuilder};
use crate::observer::{EvolutionObserver, IslandEvolutionObserver, ObserverRegistry};
use crate::rng::RandomNumberGenerator;
use crate::stats::PopulationSnapshot;
use crate::termination::{check_termination, GenerationCount, TerminationCondition};

pub use migration::{Migration, RandomMigration, RingMigration};
pub use options::{IslandOptions, IslandOptionsBuilder};

/// Forwards an island's per-generation updates to the island observers.
struct IslandForwarder<T> {
    index: usize,
    observers: Arc<ObserverRegistry<dyn IslandEvolutionObserver<T>>>,
}

impl<T: Genotype> EvolutionObserver<T> for IslandForwarder<T> {
    fn population_update(&self, snapshot: &PopulationSnapshot<T>) {
        for observer in self.observers.snapshot() {
            observer.island_population_update(self.index, snapshot);
        }
    }
}

pub struct IslandEvolution<T: Genotype> {
    islands: Vec<EvolutionEngine<T>>,
    migration: Box<dyn Migration<T>>,
    rng: Mutex<RandomNumberGenerator>,
    observers: ObserverRegistry<dyn EvolutionObserver<T>>,
    island_observers: Arc<ObserverRegistry<dyn IslandEvolutionObserver<T>>>,
    outcome: Mutex<Option<RunOutcome<T>>>,
    cancellation: CancellationToken,
}

impl<T: Genotype> IslandEvolution<T> {
    /// Coordinates the given engines, one per island.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `islands` is empty or the islands
    /// disagree on whether higher fitness is better.
    pub fn new(
        islands: Vec<EvolutionEngine<T>>,
        migration: impl Migration<T> + 'static,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let natural = islands
            .first()
            .map(EvolutionEngine::is_natural)
            .ok_or_else_genetic(|| {
                GeneticError::Configuration("At least one island is required".to_string())
            })?;
        if islands.iter().any(|island| island.is_natural() != natural) {
            return Err(GeneticError::Configuration(
                "All islands must agree on natural fitness".to_string(),
            ));
        }

        let island_observers: Arc<ObserverRegistry<dyn IslandEvolutionObserver<T>>> =
            Arc::new(ObserverRegistry::new());
        for (index, island) in islands.iter().enumerate() {
            island.add_evolution_observer(Arc::new(IslandForwarder {
                index,
                observers: Arc::clone(&island_observers),
            }));
        }

        Ok(Self {
            islands,
            migration: Box::new(migration),
            rng: Mutex::new(rng),
            observers: ObserverRegistry::new(),
            island_observers,
            outcome: Mutex::new(None),
            cancellation: CancellationToken::new(),
        })
    }

    /// Builds `island_count` engines from one builder, each with its own
    /// random number generator derived from `rng`.
    pub fn from_builder(
        island_count: usize,
        builder: &EvolutionEngineBuilder<T>,
        migration: impl Migration<T> + 'static,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let islands = (0..island_count)
            .map(|_| builder.clone().with_rng(rng.derive()).build())
            .collect::<Result<Vec<_>>>()?;
        Self::new(islands, migration, rng)
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Runs epochs until a global condition holds or the run is cancelled,
    /// and returns the combined population of all islands, fittest first.
    ///
    /// The generation number of each aggregate snapshot is the epoch index.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the options are invalid, there are no
    ///   conditions or an island's variant rejects the options.
    /// - `Evaluation` if any island's evaluation fails.
    pub fn evolve_population(
        &self,
        options: &IslandOptions,
        conditions: &[Arc<dyn TerminationCondition<T>>],
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        options.validate()?;
        if conditions.is_empty() {
            return Err(GeneticError::Configuration(
                "At least one termination condition must be specified".to_string(),
            ));
        }
        let island_options: Vec<_> = (0..self.islands.len())
            .map(|index| options.island_options(index))
            .collect();
        for (island, island_options) in self.islands.iter().zip(&island_options) {
            island.validate(island_options)?;
        }

        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = None;

        let natural = self.islands[0].is_natural();
        let epoch_condition: Arc<dyn TerminationCondition<T>> =
            Arc::new(GenerationCount::new(options.get_epoch_length())?);
        let epoch_conditions = [epoch_condition];
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(self.islands.len())
            .thread_name(|index| format!("island-{}", index))
            .build()
            .context("Failed to start island workers")?;

        let start = Instant::now();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut seeds: Vec<Vec<T>> = vec![Vec::new(); self.islands.len()];
        let mut epoch = 0;

        loop {
            let mut populations = workers.install(|| {
                self.islands
                    .par_iter()
                    .zip(island_options.par_iter())
                    .zip(seeds.par_iter())
                    .map(|((island, island_options), seeds)| {
                        island.run(island_options, seeds, &epoch_conditions, &self.cancellation)
                    })
                    .collect::<Result<Vec<_>>>()
            })?;

            let mut combined: Vec<_> = populations.iter().flatten().cloned().collect();
            sort_evaluated_population(&mut combined, natural);
            let snapshot = PopulationSnapshot::from_sorted_population(
                options.get_population_id(),
                &combined,
                natural,
                options.get_elite_count() * self.islands.len(),
                epoch,
                start,
            )?;
            if options.get_log_level() != LogLevel::None {
                info!(
                    population_id = options.get_population_id(),
                    epoch,
                    islands = self.islands.len(),
                    best = snapshot.best_fitness(),
                    mean = snapshot.mean_fitness(),
                    "Epoch complete"
                );
            }
            self.notify(&snapshot);

            let check = check_termination(&snapshot, conditions, &self.cancellation);
            if let Some(outcome) = RunOutcome::from_check(check) {
                if outcome.cancelled {
                    warn!(population_id = options.get_population_id(), epoch, "Island evolution cancelled");
                }
                *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
                return Ok(combined);
            }

            self.migration
                .migrate(&mut populations, options.get_migrant_count(), &mut *rng);
            seeds = populations
                .into_iter()
                .map(|population| {
                    population
                        .into_iter()
                        .map(EvaluatedCandidate::into_candidate)
                        .collect()
                })
                .collect();
            epoch += 1;
        }
    }

    /// Runs the islands and returns only the fittest candidate overall.
    pub fn evolve(
        &self,
        options: &IslandOptions,
        conditions: &[Arc<dyn TerminationCondition<T>>],
    ) -> Result<T> {
        self.evolve_population(options, conditions)?
            .into_iter()
            .next()
            .map(EvaluatedCandidate::into_candidate)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// The global conditions that stopped the most recent completed run.
    /// Empty if that run was cancelled.
    ///
    /// # Errors
    ///
    /// Returns a `StateQuery` error if no run has completed yet.
    pub fn satisfied_termination_conditions(&self) -> Result<Vec<Arc<dyn TerminationCondition<T>>>> {
        satisfied_of(&self.outcome)
    }

    pub fn was_cancelled(&self) -> Result<bool> {
        cancelled_of(&self.outcome)
    }

    /// Receives one aggregate snapshot per epoch.
    pub fn add_evolution_observer(&self, observer: Arc<dyn EvolutionObserver<T>>) {
        self.observers.add(observer);
    }

    pub fn remove_evolution_observer(&self, observer: &Arc<dyn EvolutionObserver<T>>) -> bool {
        self.observers.remove(observer)
    }

    /// Receives per-island generation updates and aggregate epoch updates.
    pub fn add_island_observer(&self, observer: Arc<dyn IslandEvolutionObserver<T>>) {
        self.island_observers.add(observer);
    }

    pub fn remove_island_observer(&self, observer: &Arc<dyn IslandEvolutionObserver<T>>) -> bool {
        self.island_observers.remove(observer)
    }

    /// Cancels the whole run. Islands stop at their next generation
    /// boundary and the coordinator at the end of the current epoch.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    fn notify(&self, snapshot: &PopulationSnapshot<T>) {
        self.observers.notify(snapshot);
        for observer in self.island_observers.snapshot() {
            observer.population_update(snapshot);
        }
    }
}
