//! # Error Types
//!
//! This module defines the error type shared by every engine, the island
//! coordinator and the evaluation pool.
//!
//! Configuration problems are reported before any generation runs, failures
//! inside fitness or expression tasks abort the run, and querying run state
//! before a run has finished is reported as a state query error. Cooperative
//! cancellation is never an error; it is part of the normal return value.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use islandga::error::{GeneticError, Result};
//!
//! fn validate(elite_count: usize, population_size: usize) -> Result<()> {
//!     if elite_count >= population_size {
//!         return Err(GeneticError::Configuration(
//!             "Elite count must be less than population size".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate(2, 10).is_ok());
//! assert!(validate(10, 10).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use islandga::error::{GeneticError, OptionExt};
//!
//! fn fittest(scores: &[f64]) -> islandga::error::Result<f64> {
//!     scores.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(fittest(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while running an evolutionary process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// An invalid run or engine configuration, detected before any work starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A fitness or expression task failed.
    ///
    /// The message is the wrapped cause: the panic payload of a panicking
    /// task, or the rendered error of a task that returned one. It is kept
    /// as text so the error stays `Clone` and `PartialEq`.
    #[error("Evaluation failure: {0}")]
    Evaluation(String),

    /// A step broke its contract mid-run, e.g. produced too few survivors.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Run-completion state was queried before any run completed.
    #[error("State query error: {0}")]
    StateQuery(String),

    /// An operation required a non-empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A name-keyed registry lookup or registration failed.
    #[error("Registry error: {0}")]
    Registry(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for evolutionary operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use islandga::error::ResultExt;
///
/// fn parse_count(raw: &str) -> islandga::error::Result<usize> {
///     raw.parse::<usize>().context("Failed to parse generation count")
/// }
///
/// assert!(parse_count("12").is_ok());
/// assert!(parse_count("twelve").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Renders a panic payload caught from an evaluation task.
pub(crate) fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked with a non-string payload".to_string()
    }
}
