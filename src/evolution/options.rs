//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the per-run parameters of an
//! evolution engine: the population id handed to expression strategies, the
//! population size, the elite count, the logging level and the
//! single-threaded switch.
//!
//! ## Example
//!
//! ```rust
//! use islandga::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(50, 5);
//!
//! // Or use the builder
//! let options = EvolutionOptions::builder()
//!     .population_id("experiment-1")
//!     .population_size(50)
//!     .elite_count(5)
//!     .log_level(LogLevel::Minimal)
//!     .single_threaded(true)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Logging levels
//!
//! - `Verbose`: a summary per generation plus every scored individual.
//! - `Minimal`: a summary per generation.
//! - `None`: no per-generation events.

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    population_id: String,
    population_size: usize,
    elite_count: usize,
    log_level: LogLevel,
    /// Evaluate on the calling thread instead of the shared pool
    single_threaded: bool,
}

impl EvolutionOptions {
    pub fn new(population_size: usize, elite_count: usize) -> Self {
        Self {
            population_size,
            elite_count,
            ..Self::default()
        }
    }

    pub fn get_population_id(&self) -> &str {
        &self.population_id
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn is_single_threaded(&self) -> bool {
        self.single_threaded
    }

    /// Sets the population id.
    pub fn set_population_id(&mut self, population_id: impl Into<String>) {
        self.population_id = population_id.into();
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the elite count.
    pub fn set_elite_count(&mut self, elite_count: usize) {
        self.elite_count = elite_count;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the single-threaded switch.
    pub fn set_single_threaded(&mut self, single_threaded: bool) {
        self.single_threaded = single_threaded;
    }

    /// Checks the options every engine requires.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the population is empty or the
    /// elite count is not less than the population size.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.elite_count >= self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elite count ({}) must be less than population size ({})",
                self.elite_count, self.population_size
            )));
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_id: "population".to_string(),
            population_size: 100,
            elite_count: 0,
            log_level: LogLevel::None,
            single_threaded: false,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_id: Option<String>,
    population_size: Option<usize>,
    elite_count: Option<usize>,
    log_level: Option<LogLevel>,
    single_threaded: Option<bool>,
}

impl EvolutionOptionsBuilder {
    /// Sets the population id.
    pub fn population_id(mut self, value: impl Into<String>) -> Self {
        self.population_id = Some(value.into());
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the elite count.
    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the single-threaded switch.
    pub fn single_threaded(mut self, value: bool) -> Self {
        self.single_threaded = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_id: self.population_id.unwrap_or(defaults.population_id),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            single_threaded: self.single_threaded.unwrap_or(defaults.single_threaded),
        }
    }
}
