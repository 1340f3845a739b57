//! # islandga
//!
//! A population-based evolutionary runtime. An [`EvolutionEngine`] evolves a
//! single population with one of three variants (generational, steady-state
//! or an evolution strategy); an [`IslandEvolution`] runs several engines
//! concurrently and migrates individuals between them at epoch boundaries.
//!
//! The problem itself is supplied by the caller: a candidate factory, a
//! fitness evaluator (optionally behind an expression strategy), a selection
//! strategy and an evolutionary operator. Fitness evaluation runs on a shared
//! worker pool unless a run is marked single-threaded.

pub mod cancel;
pub mod candidate;
pub mod error;
pub mod evaluation;
pub mod evolution;
pub mod factory;
pub mod fitness;
pub mod islands;
pub mod observer;
pub mod operators;
pub mod registry;
pub mod rng;
pub mod selection;
pub mod stats;
pub mod termination;

// Re-export commonly used types for convenience
pub use cancel::CancellationToken;
pub use candidate::{EvaluatedCandidate, ExpressedCandidate, Genotype};
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evaluation::EvaluationPool;
pub use evolution::{
    EvolutionEngine, EvolutionEngineBuilder, EvolutionOptions, EvolutionStep, EvolutionStrategy,
    GenerationalEvolution, LogLevel, SteadyStateEvolution,
};
pub use factory::CandidateFactory;
pub use fitness::{ExpressedFitnessEvaluator, ExpressionStrategy, FitnessEvaluator};
pub use islands::{IslandEvolution, IslandOptions, Migration, RandomMigration, RingMigration};
pub use observer::{EvolutionObserver, IslandEvolutionObserver};
pub use operators::{EvolutionPipeline, EvolutionaryOperator};
pub use registry::Registry;
pub use rng::RandomNumberGenerator;
pub use selection::{SelectionStrategy, TournamentSelection};
pub use stats::PopulationSnapshot;
pub use termination::{
    ElapsedTime, GenerationCount, Stagnation, TargetFitness, TerminationCondition, UserAbort,
};
