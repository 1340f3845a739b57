use super::TerminationCondition;
use crate::stats::PopulationSnapshot;

/// Terminates once the best fitness reaches a target.
///
/// With natural fitness the target is reached when the best score is at
/// least `target_fitness`; otherwise when it is at most `target_fitness`.
#[derive(Debug, Clone)]
pub struct TargetFitness {
    target_fitness: f64,
    natural_fitness: bool,
}

impl TargetFitness {
    pub fn new(target_fitness: f64, natural_fitness: bool) -> Self {
        Self {
            target_fitness,
            natural_fitness,
        }
    }

    pub fn target_fitness(&self) -> f64 {
        self.target_fitness
    }
}

impl<T> TerminationCondition<T> for TargetFitness {
    fn should_terminate(&self, snapshot: &PopulationSnapshot<T>) -> bool {
        if self.natural_fitness {
            snapshot.best_fitness() >= self.target_fitness
        } else {
            snapshot.best_fitness() <= self.target_fitness
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::snapshot_at;

    #[test]
    fn test_natural_fitness() {
        let condition = TargetFitness::new(10.0, true);
        assert!(!condition.should_terminate(&snapshot_at(0, 5.0, 100)));
        assert!(condition.should_terminate(&snapshot_at(0, 10.0, 100)));
        assert!(condition.should_terminate(&snapshot_at(0, 11.0, 100)));
    }

    #[test]
    fn test_non_natural_fitness() {
        let condition = TargetFitness::new(1.0, false);
        assert!(!condition.should_terminate(&snapshot_at(0, 5.0, 100)));
        assert!(condition.should_terminate(&snapshot_at(0, 1.0, 100)));
        assert!(condition.should_terminate(&snapshot_at(0, 0.5, 100)));
    }
}
