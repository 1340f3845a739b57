//! # Termination Conditions
//!
//! A run stops once any of its termination conditions holds. Conditions are
//! predicates over a [`PopulationSnapshot`]; some carry internal state (the
//! stagnation detector) or can be flipped from another thread (the user abort
//! flag).
//!
//! [`check_termination`] evaluates a condition list in supplied order. A
//! pending cooperative cancellation is checked first and short-circuits the
//! evaluation; otherwise every condition is evaluated (so stateful conditions
//! see every generation) and all that hold are reported.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use islandga::cancel::CancellationToken;
//! use islandga::stats::PopulationSnapshot;
//! use islandga::termination::{check_termination, GenerationCount, TargetFitness, TerminationCheck, TerminationCondition};
//!
//! let conditions: Vec<Arc<dyn TerminationCondition<u32>>> = vec![
//!     Arc::new(GenerationCount::new(100).unwrap()),
//!     Arc::new(TargetFitness::new(10.0, true)),
//! ];
//! let snapshot = PopulationSnapshot::new("pop", 1, 12.0, 8.0, 1.0, true, 10, 0, 3, Duration::ZERO);
//!
//! match check_termination(&snapshot, &conditions, &CancellationToken::new()) {
//!     TerminationCheck::Satisfied(satisfied) => assert_eq!(satisfied.len(), 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod elapsed_time;
pub mod generation_count;
pub mod stagnation;
pub mod target_fitness;
pub mod user_abort;

use std::fmt::Debug;
use std::sync::Arc;

use crate::cancel::CancellationToken;
use crate::stats::PopulationSnapshot;

pub use elapsed_time::ElapsedTime;
pub use generation_count::GenerationCount;
pub use stagnation::Stagnation;
pub use target_fitness::TargetFitness;
pub use user_abort::UserAbort;

/// A predicate deciding whether a run should stop.
///
/// Conditions are only ever evaluated on the thread that owns the run.
/// State that other threads may change must be thread-safe.
pub trait TerminationCondition<T>: Debug + Send + Sync {
    fn should_terminate(&self, snapshot: &PopulationSnapshot<T>) -> bool;
}

/// The outcome of evaluating a list of termination conditions.
#[derive(Debug)]
pub enum TerminationCheck<T> {
    /// No condition holds; the run continues.
    Continue,
    /// Cooperative cancellation was requested; no condition was evaluated.
    Cancelled,
    /// One or more conditions hold, in the order they were supplied.
    Satisfied(Vec<Arc<dyn TerminationCondition<T>>>),
}

impl<T> TerminationCheck<T> {
    pub fn should_stop(&self) -> bool {
        !matches!(self, TerminationCheck::Continue)
    }

    /// The satisfied set recorded when the run stops: empty for a
    /// cancellation, `None` when the run continues.
    pub fn into_satisfied(self) -> Option<Vec<Arc<dyn TerminationCondition<T>>>> {
        match self {
            TerminationCheck::Continue => None,
            TerminationCheck::Cancelled => Some(Vec::new()),
            TerminationCheck::Satisfied(satisfied) => Some(satisfied),
        }
    }
}

/// Evaluates `conditions` against `snapshot`.
pub fn check_termination<T>(
    snapshot: &PopulationSnapshot<T>,
    conditions: &[Arc<dyn TerminationCondition<T>>],
    cancellation: &CancellationToken,
) -> TerminationCheck<T> {
    if cancellation.is_cancelled() {
        return TerminationCheck::Cancelled;
    }

    let satisfied: Vec<_> = conditions
        .iter()
        .filter(|condition| condition.should_terminate(snapshot))
        .cloned()
        .collect();

    if satisfied.is_empty() {
        TerminationCheck::Continue
    } else {
        TerminationCheck::Satisfied(satisfied)
    }
}

#[cfg(test)]
pub(crate) fn snapshot_at(generation: usize, best: f64, elapsed_millis: u64) -> PopulationSnapshot<()> {
    PopulationSnapshot::new(
        "test",
        (),
        best,
        best / 2.0,
        0.0,
        true,
        2,
        0,
        generation,
        std::time::Duration::from_millis(elapsed_millis),
    )
}
