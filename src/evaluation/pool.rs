use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::error::{describe_panic, GeneticError, Result, ResultExt};

static SHARED_POOL: Mutex<Option<Arc<EvaluationPool>>> = Mutex::new(None);

/// A worker pool for evaluation tasks.
///
/// One process-wide instance is created lazily on first use and shared by
/// every engine and island in the process; see [`EvaluationPool::shared`].
/// The shared instance has an explicit lifecycle: [`EvaluationPool::init`]
/// creates it with a chosen size and [`EvaluationPool::shutdown`] releases it.
#[derive(Debug)]
pub struct EvaluationPool {
    pool: ThreadPool,
}

impl EvaluationPool {
    /// Creates a standalone pool with `num_threads` workers.
    pub fn new(num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(GeneticError::Configuration(
                "Evaluation pool needs at least one thread".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("evaluation-worker-{}", index))
            .build()
            .context("Failed to build evaluation pool")?;

        Ok(Self { pool })
    }

    /// Returns the process-wide pool, creating it on first use with one
    /// worker per available hardware thread.
    pub fn shared() -> Result<Arc<Self>> {
        let mut shared = SHARED_POOL.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pool) = shared.as_ref() {
            return Ok(pool.clone());
        }

        let num_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let pool = Arc::new(Self::new(num_threads)?);
        debug!(num_threads, "Created shared evaluation pool");
        *shared = Some(pool.clone());
        Ok(pool)
    }

    /// Creates the process-wide pool with an explicit size.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the shared pool already exists.
    pub fn init(num_threads: usize) -> Result<Arc<Self>> {
        let mut shared = SHARED_POOL.lock().unwrap_or_else(PoisonError::into_inner);
        if shared.is_some() {
            return Err(GeneticError::Configuration(
                "Shared evaluation pool is already initialised".to_string(),
            ));
        }

        let pool = Arc::new(Self::new(num_threads)?);
        debug!(num_threads, "Initialised shared evaluation pool");
        *shared = Some(pool.clone());
        Ok(pool)
    }

    /// Releases the process-wide pool.
    ///
    /// Batches already running keep their handle and finish normally; the
    /// worker threads exit once the last handle is dropped. The next call to
    /// [`EvaluationPool::shared`] creates a fresh pool. Returns whether a pool
    /// was released.
    pub fn shutdown() -> bool {
        let released = SHARED_POOL
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if released {
            debug!("Released shared evaluation pool");
        }
        released
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `task` over every input and blocks until all of them finish.
    ///
    /// Outputs are in the same order as `inputs`. A task that returns an
    /// error or panics fails the whole batch with an `Evaluation` error.
    pub fn evaluate<I, O, F>(&self, inputs: &[I], task: F) -> Result<Vec<O>>
    where
        I: Sync,
        O: Send,
        F: Fn(&I) -> Result<O> + Sync,
    {
        trace!(tasks = inputs.len(), threads = self.thread_count(), "Submitting batch");
        self.pool.install(|| {
            inputs
                .par_iter()
                .map(|input| guarded(|| task(input)))
                .collect::<Result<Vec<O>>>()
        })
    }
}

/// Runs a batch either on the shared pool or, when `single_threaded` is set,
/// sequentially on the calling thread.
pub fn run_batch<I, O, F>(single_threaded: bool, inputs: &[I], task: F) -> Result<Vec<O>>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> Result<O> + Sync,
{
    if single_threaded {
        inputs.iter().map(|input| guarded(|| task(input))).collect()
    } else {
        EvaluationPool::shared()?.evaluate(inputs, task)
    }
}

fn guarded<O>(task: impl FnOnce() -> Result<O>) -> Result<O> {
    match catch_unwind(AssertUnwindSafe(task)) {
        Ok(Err(GeneticError::Evaluation(cause))) => Err(GeneticError::Evaluation(cause)),
        Ok(Err(other)) => Err(GeneticError::Evaluation(other.to_string())),
        Ok(Ok(output)) => Ok(output),
        Err(payload) => Err(GeneticError::Evaluation(format!(
            "Evaluation task panicked: {}",
            describe_panic(payload.as_ref())
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_results_in_submission_order() {
        let pool = EvaluationPool::new(4).unwrap();
        let inputs: Vec<u64> = (0..64).collect();

        // Earlier inputs sleep longer, so they finish last
        let outputs = pool
            .evaluate(&inputs, |&x| {
                std::thread::sleep(Duration::from_micros(64 - x));
                Ok(x * 10)
            })
            .unwrap();

        assert_eq!(outputs, inputs.iter().map(|x| x * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_task_error_fails_batch() {
        let pool = EvaluationPool::new(2).unwrap();
        let inputs = vec![1, 2, 3];
        let result = pool.evaluate(&inputs, |&x| {
            if x == 2 {
                Err(GeneticError::Other("bad input".to_string()))
            } else {
                Ok(x)
            }
        });

        match result {
            Err(GeneticError::Evaluation(cause)) => assert!(cause.contains("bad input")),
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_task_panic_fails_batch() {
        let inputs = vec![1, 2, 3];
        let result: Result<Vec<i32>> = run_batch(true, &inputs, |&x| {
            if x == 3 {
                panic!("fitness exploded");
            }
            Ok(x)
        });

        match result {
            Err(GeneticError::Evaluation(cause)) => assert!(cause.contains("fitness exploded")),
            other => panic!("Expected Evaluation error, got {:?}", other),
        }
    }

    #[test]
    fn test_cause_is_wrapped_once() {
        let inputs = vec![1, 2];
        let returned: Result<Vec<i32>> = run_batch(true, &inputs, |_| {
            Err(GeneticError::Configuration("bad genome".to_string()))
        });
        assert_eq!(
            returned,
            Err(GeneticError::Evaluation(
                "Configuration error: bad genome".to_string()
            ))
        );

        let nested: Result<Vec<i32>> = run_batch(true, &inputs, |_| {
            Err(GeneticError::Evaluation("expression failed".to_string()))
        });
        assert_eq!(
            nested.unwrap_err().to_string(),
            "Evaluation failure: expression failed"
        );
    }

    #[test]
    fn test_single_threaded_runs_on_calling_thread() {
        let caller = std::thread::current().id();
        let inputs = vec![(); 8];
        let threads = run_batch(true, &inputs, |_| Ok(std::thread::current().id())).unwrap();
        assert!(threads.iter().all(|&id| id == caller));
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            EvaluationPool::new(0),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_shared_pool_is_reused() {
        let first = EvaluationPool::shared().unwrap();
        let second = EvaluationPool::shared().unwrap();
        assert!(first.thread_count() >= 1);
        // Another test may shut the shared pool down in between, so only
        // compare when both handles came from the same instance.
        if Arc::ptr_eq(&first, &second) {
            assert_eq!(first.thread_count(), second.thread_count());
        }
    }
}
