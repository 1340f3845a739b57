//! # Evaluation
//!
//! Concurrent, barrier-synchronised execution of per-individual work
//! (expression and fitness scoring).
//!
//! Every batch is submitted as a whole and the caller blocks until every task
//! in it has finished. Results come back in submission order regardless of
//! completion order. A run-level single-threaded switch bypasses the pool and
//! evaluates on the calling thread.

pub mod pool;
pub(crate) mod scoring;

pub use pool::{run_batch, EvaluationPool};
