use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::builder::EvolutionEngineBuilder;
use super::options::{EvolutionOptions, LogLevel};
use super::step::{EvolutionStep, StepContext};
use crate::cancel::CancellationToken;
use crate::candidate::{sort_evaluated_population, EvaluatedCandidate, Genotype};
use crate::error::{GeneticError, OptionExt, Result};
use crate::evaluation::scoring::Scoring;
use crate::factory::CandidateFactory;
use crate::observer::{EvolutionObserver, ObserverRegistry};
use crate::rng::RandomNumberGenerator;
use crate::stats::PopulationSnapshot;
use crate::termination::{check_termination, TerminationCheck, TerminationCondition};

/// How the most recent run of an engine ended.
pub(crate) struct RunOutcome<T> {
    pub(crate) satisfied: Vec<Arc<dyn TerminationCondition<T>>>,
    pub(crate) cancelled: bool,
}

impl<T> RunOutcome<T> {
    pub(crate) fn from_check(check: TerminationCheck<T>) -> Option<Self> {
        let cancelled = matches!(check, TerminationCheck::Cancelled);
        check.into_satisfied().map(|satisfied| Self {
            satisfied,
            cancelled,
        })
    }
}

/// Reads the satisfied set of a completed run.
pub(crate) fn satisfied_of<T>(
    outcome: &Mutex<Option<RunOutcome<T>>>,
) -> Result<Vec<Arc<dyn TerminationCondition<T>>>> {
    outcome
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|outcome| outcome.satisfied.clone())
        .ok_or_else_genetic(|| {
            GeneticError::StateQuery("No evolution run has completed yet".to_string())
        })
}

pub(crate) fn cancelled_of<T>(outcome: &Mutex<Option<RunOutcome<T>>>) -> Result<bool> {
    outcome
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|outcome| outcome.cancelled)
        .ok_or_else_genetic(|| {
            GeneticError::StateQuery("No evolution run has completed yet".to_string())
        })
}

/// Runs a single population through generations until a termination
/// condition holds or the run is cancelled.
///
/// Every run follows the same loop: create (and seed) the initial
/// population, score it, then per generation sort, summarise, notify
/// observers, check termination and finally hand the population to the
/// configured [`EvolutionStep`] for the next generation.
///
/// Engines are built with [`EvolutionEngine::builder`].
pub struct EvolutionEngine<T: Genotype> {
    factory: Arc<dyn CandidateFactory<T>>,
    scoring: Arc<dyn Scoring<T>>,
    step: Arc<dyn EvolutionStep<T>>,
    rng: Mutex<RandomNumberGenerator>,
    observers: ObserverRegistry<dyn EvolutionObserver<T>>,
    outcome: Mutex<Option<RunOutcome<T>>>,
    cancellation: CancellationToken,
}

impl<T: Genotype> EvolutionEngine<T> {
    pub(crate) fn new(
        factory: Arc<dyn CandidateFactory<T>>,
        scoring: Arc<dyn Scoring<T>>,
        step: Arc<dyn EvolutionStep<T>>,
        rng: RandomNumberGenerator,
    ) -> Self {
        Self {
            factory,
            scoring,
            step,
            rng: Mutex::new(rng),
            observers: ObserverRegistry::new(),
            outcome: Mutex::new(None),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn builder() -> EvolutionEngineBuilder<T> {
        EvolutionEngineBuilder::new()
    }

    /// Runs the engine and returns the final population, fittest first.
    ///
    /// # Arguments
    ///
    /// * `options` - Population size, elite count, logging and threading.
    /// * `seeds` - Candidates placed at the front of the initial population.
    /// * `conditions` - At least one termination condition.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the options are invalid, there are no
    ///   termination conditions, there are too many seeds or the variant
    ///   rejects the options. Nothing runs in that case.
    /// - `Evaluation` if a fitness or expression task fails.
    pub fn evolve_population(
        &self,
        options: &EvolutionOptions,
        seeds: &[T],
        conditions: &[Arc<dyn TerminationCondition<T>>],
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        self.run(options, seeds, conditions, &self.cancellation)
    }

    /// Runs the engine and returns only the fittest candidate.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        seeds: &[T],
        conditions: &[Arc<dyn TerminationCondition<T>>],
    ) -> Result<T> {
        self.evolve_population(options, seeds, conditions)?
            .into_iter()
            .next()
            .map(EvaluatedCandidate::into_candidate)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// The conditions that stopped the most recent completed run, in the
    /// order they were supplied. Empty if that run was cancelled.
    ///
    /// # Errors
    ///
    /// Returns a `StateQuery` error if no run has completed yet.
    pub fn satisfied_termination_conditions(&self) -> Result<Vec<Arc<dyn TerminationCondition<T>>>> {
        satisfied_of(&self.outcome)
    }

    /// Whether the most recent completed run stopped because of cancellation.
    pub fn was_cancelled(&self) -> Result<bool> {
        cancelled_of(&self.outcome)
    }

    pub fn add_evolution_observer(&self, observer: Arc<dyn EvolutionObserver<T>>) {
        self.observers.add(observer);
    }

    pub fn remove_evolution_observer(&self, observer: &Arc<dyn EvolutionObserver<T>>) -> bool {
        self.observers.remove(observer)
    }

    /// A handle that cancels runs of this engine at the next generation
    /// boundary. The request stays in effect until the token is reset.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn is_natural(&self) -> bool {
        self.scoring.is_natural()
    }

    /// Checks everything a run would reject before doing any work.
    pub(crate) fn validate(&self, options: &EvolutionOptions) -> Result<()> {
        options.validate()?;
        self.step.validate(options)
    }

    pub(crate) fn run(
        &self,
        options: &EvolutionOptions,
        seeds: &[T],
        conditions: &[Arc<dyn TerminationCondition<T>>],
        cancellation: &CancellationToken,
    ) -> Result<Vec<EvaluatedCandidate<T>>> {
        self.validate(options)?;
        if conditions.is_empty() {
            return Err(GeneticError::Configuration(
                "At least one termination condition must be specified".to_string(),
            ));
        }

        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = None;

        let population_id = options.get_population_id();
        let natural = self.scoring.is_natural();
        let single_threaded = options.is_single_threaded();
        let start = Instant::now();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let initial = self.factory.generate_initial_population(
            options.get_population_size(),
            seeds,
            &mut *rng,
        )?;
        let mut population = self
            .scoring
            .score(&initial, population_id, single_threaded)
            .inspect_err(|e| warn!(population_id, error = %e, "Initial population failed"))?;
        let mut generation = 0;

        loop {
            sort_evaluated_population(&mut population, natural);
            let snapshot = PopulationSnapshot::from_sorted_population(
                population_id,
                &population,
                natural,
                options.get_elite_count(),
                generation,
                start,
            )?;
            self.log_generation(options, &snapshot, &population);
            self.observers.notify(&snapshot);

            let check = check_termination(&snapshot, conditions, cancellation);
            if let Some(outcome) = RunOutcome::from_check(check) {
                if outcome.cancelled {
                    warn!(population_id, generation, "Evolution cancelled");
                } else if options.get_log_level() != LogLevel::None {
                    info!(
                        population_id,
                        generation,
                        satisfied = outcome.satisfied.len(),
                        "Evolution terminated"
                    );
                }
                *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
                return Ok(population);
            }

            generation += 1;
            let expected = population.len();
            let mut context = StepContext {
                scoring: self.scoring.as_ref(),
                rng: &mut *rng,
                population_id,
                elite_count: options.get_elite_count(),
                single_threaded,
            };
            population = self
                .step
                .next_generation(population, &mut context)
                .inspect_err(|e| {
                    warn!(population_id, generation, step = self.step.name(), error = %e, "Generation failed");
                })?;
            if population.len() != expected {
                warn!(population_id, generation, expected, actual = population.len(), "Population size changed");
                return Err(GeneticError::Evolution(format!(
                    "The {} step produced {} individuals in generation {}, expected {}",
                    self.step.name(),
                    population.len(),
                    generation,
                    expected
                )));
            }
        }
    }

    fn log_generation(
        &self,
        options: &EvolutionOptions,
        snapshot: &PopulationSnapshot<T>,
        population: &[EvaluatedCandidate<T>],
    ) {
        match options.get_log_level() {
            LogLevel::None => {}
            LogLevel::Minimal => {
                info!(
                    population_id = snapshot.population_id(),
                    generation = snapshot.generation_number(),
                    best = snapshot.best_fitness(),
                    mean = snapshot.mean_fitness(),
                    "Generation complete"
                );
            }
            LogLevel::Verbose => {
                info!(
                    population_id = snapshot.population_id(),
                    generation = snapshot.generation_number(),
                    step = self.step.name(),
                    best = snapshot.best_fitness(),
                    mean = snapshot.mean_fitness(),
                    std_dev = snapshot.fitness_standard_deviation(),
                    elapsed_ms = snapshot.elapsed_millis(),
                    "Generation complete"
                );
                for individual in population {
                    debug!(candidate = ?individual.candidate(), fitness = individual.fitness(), "Individual");
                }
            }
        }
    }
}
