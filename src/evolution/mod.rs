pub mod builder;
pub mod engine;
pub mod evolution_strategy;
pub mod generational;
pub mod options;
pub mod steady_state;
pub mod step;

pub use builder::EvolutionEngineBuilder;
pub use engine::EvolutionEngine;
pub use evolution_strategy::EvolutionStrategy;
pub use generational::GenerationalEvolution;
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use steady_state::SteadyStateEvolution;
pub use step::{EvolutionStep, StepContext};
