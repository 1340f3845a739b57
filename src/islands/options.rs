//! Per-run parameters of an island coordinator.
//!
//! Every island runs with the same population size, elite count, logging
//! level and threading switch. Islands are identified in logs and towards
//! expression strategies as `"{population_id}-{index}"`.

use crate::error::{GeneticError, Result};
use crate::evolution::options::{EvolutionOptions, LogLevel};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct IslandOptions {
    population_id: String,
    population_size: usize,
    elite_count: usize,
    epoch_length: usize,
    migrant_count: usize,
    log_level: LogLevel,
    single_threaded: bool,
}

impl IslandOptions {
    pub fn new(
        population_size: usize,
        elite_count: usize,
        epoch_length: usize,
        migrant_count: usize,
    ) -> Self {
        Self {
            population_size,
            elite_count,
            epoch_length,
            migrant_count,
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

    pub fn get_epoch_length(&self) -> usize {
        self.epoch_length
    }

    pub fn get_migrant_count(&self) -> usize {
        self.migrant_count
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn is_single_threaded(&self) -> bool {
        self.single_threaded
    }

    pub fn set_population_id(&mut self, population_id: impl Into<String>) {
        self.population_id = population_id.into();
    }

    pub fn set_epoch_length(&mut self, epoch_length: usize) {
        self.epoch_length = epoch_length;
    }

    pub fn set_migrant_count(&mut self, migrant_count: usize) {
        self.migrant_count = migrant_count;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_single_threaded(&mut self, single_threaded: bool) {
        self.single_threaded = single_threaded;
    }

    /// # Errors
    ///
    /// Returns a `Configuration` error for an empty population, an elite
    /// count not less than the population size, a zero epoch length or more
    /// migrants than individuals per island.
    pub fn validate(&self) -> Result<()> {
        self.island_options(0).validate()?;

        if self.epoch_length == 0 {
            return Err(GeneticError::Configuration(
                "Epoch length must be at least 1".to_string(),
            ));
        }

        if self.migrant_count > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Migrant count ({}) cannot exceed population size ({})",
                self.migrant_count, self.population_size
            )));
        }

        Ok(())
    }

    /// The options island `index` runs each epoch with.
    pub fn island_options(&self, index: usize) -> EvolutionOptions {
        EvolutionOptions::builder()
            .population_id(format!("{}-{}", self.population_id, index))
            .population_size(self.population_size)
            .elite_count(self.elite_count)
            .log_level(self.log_level)
            .single_threaded(self.single_threaded)
            .build()
    }

    pub fn builder() -> IslandOptionsBuilder {
        IslandOptionsBuilder::default()
    }
}

impl Default for IslandOptions {
    fn default() -> Self {
        Self {
            population_id: "island".to_string(),
            population_size: 100,
            elite_count: 0,
            epoch_length: 50,
            migrant_count: 0,
            log_level: LogLevel::None,
            single_threaded: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IslandOptionsBuilder {
    population_id: Option<String>,
    population_size: Option<usize>,
    elite_count: Option<usize>,
    epoch_length: Option<usize>,
    migrant_count: Option<usize>,
    log_level: Option<LogLevel>,
    single_threaded: Option<bool>,
}

impl IslandOptionsBuilder {
    pub fn population_id(mut self, value: impl Into<String>) -> Self {
        self.population_id = Some(value.into());
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn epoch_length(mut self, value: usize) -> Self {
        self.epoch_length = Some(value);
        self
    }

    pub fn migrant_count(mut self, value: usize) -> Self {
        self.migrant_count = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn single_threaded(mut self, value: bool) -> Self {
        self.single_threaded = Some(value);
        self
    }

    pub fn build(self) -> IslandOptions {
        let defaults = IslandOptions::default();
        IslandOptions {
            population_id: self.population_id.unwrap_or(defaults.population_id),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            epoch_length: self.epoch_length.unwrap_or(defaults.epoch_length),
            migrant_count: self.migrant_count.unwrap_or(defaults.migrant_count),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            single_threaded: self.single_threaded.unwrap_or(defaults.single_threaded),
        }
    }
}
