use super::TerminationCondition;
use crate::error::{GeneticError, Result};
use crate::stats::PopulationSnapshot;

/// Terminates once a fixed number of generations has been evaluated.
///
/// Generation numbers are zero-based, so `GenerationCount::new(5)` holds at
/// generation 4.
#[derive(Debug, Clone)]
pub struct GenerationCount {
    generation_count: usize,
}

impl GenerationCount {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `generation_count` is zero.
    pub fn new(generation_count: usize) -> Result<Self> {
        if generation_count == 0 {
            return Err(GeneticError::Configuration(
                "Generation count must be positive".to_string(),
            ));
        }
        Ok(Self { generation_count })
    }

    pub fn generation_count(&self) -> usize {
        self.generation_count
    }
}

impl<T> TerminationCondition<T> for GenerationCount {
    fn should_terminate(&self, snapshot: &PopulationSnapshot<T>) -> bool {
        snapshot.generation_number() + 1 >= self.generation_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::snapshot_at;

    #[test]
    fn test_generation_counts() {
        let condition = GenerationCount::new(5).unwrap();
        // Generation 3 is the 4th generation
        assert!(!condition.should_terminate(&snapshot_at(3, 0.0, 100)));
        // Generation 4 is the 5th generation
        assert!(condition.should_terminate(&snapshot_at(4, 0.0, 100)));
    }

    #[test]
    fn test_single_generation() {
        let condition = GenerationCount::new(1).unwrap();
        assert!(condition.should_terminate(&snapshot_at(0, 0.0, 0)));
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(matches!(
            GenerationCount::new(0),
            Err(GeneticError::Configuration(_))
        ));
    }
}
