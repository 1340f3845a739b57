use std::time::Duration;

use super::TerminationCondition;
use crate::error::{GeneticError, Result};
use crate::stats::PopulationSnapshot;

/// Terminates once the run has been going for at least a fixed time.
#[derive(Debug, Clone)]
pub struct ElapsedTime {
    max_duration: Duration,
}

impl ElapsedTime {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `max_duration` is zero.
    pub fn new(max_duration: Duration) -> Result<Self> {
        if max_duration.is_zero() {
            return Err(GeneticError::Configuration(
                "Elapsed time budget must be positive".to_string(),
            ));
        }
        Ok(Self { max_duration })
    }

    pub fn from_millis(millis: u64) -> Result<Self> {
        Self::new(Duration::from_millis(millis))
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }
}

impl<T> TerminationCondition<T> for ElapsedTime {
    fn should_terminate(&self, snapshot: &PopulationSnapshot<T>) -> bool {
        snapshot.elapsed() >= self.max_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::snapshot_at;

    #[test]
    fn test_elapsed_time() {
        let condition = ElapsedTime::from_millis(1000).unwrap();
        assert!(!condition.should_terminate(&snapshot_at(0, 1.0, 100)));
        assert!(!condition.should_terminate(&snapshot_at(5, 1.0, 999)));
        assert!(condition.should_terminate(&snapshot_at(6, 1.0, 1000)));
        assert!(condition.should_terminate(&snapshot_at(7, 1.0, 5000)));
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert!(matches!(
            ElapsedTime::from_millis(0),
            Err(GeneticError::Configuration(_))
        ));
    }
}
