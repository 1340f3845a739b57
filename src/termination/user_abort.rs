use std::sync::atomic::{AtomicBool, Ordering};

use super::TerminationCondition;
use crate::stats::PopulationSnapshot;

/// Terminates once [`UserAbort::abort`] has been called.
///
/// The flag can be set from any thread, including one that has nothing to do
/// with the run. Once set it stays set.
#[derive(Debug, Default)]
pub struct UserAbort {
    aborted: AtomicBool,
}

impl UserAbort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

impl<T> TerminationCondition<T> for UserAbort {
    fn should_terminate(&self, _snapshot: &PopulationSnapshot<T>) -> bool {
        self.is_aborted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::snapshot_at;
    use std::sync::Arc;

    #[test]
    fn test_abort() {
        let condition = UserAbort::new();
        // This snapshot should be irrelevant
        let snapshot = snapshot_at(0, 0.0, 100);
        assert!(!condition.should_terminate(&snapshot));
        assert!(!condition.is_aborted());

        condition.abort();
        assert!(condition.should_terminate(&snapshot));
        assert!(condition.is_aborted());
    }

    #[test]
    fn test_abort_from_other_thread() {
        let condition = Arc::new(UserAbort::new());
        let remote = condition.clone();
        std::thread::spawn(move || remote.abort()).join().unwrap();
        assert!(condition.should_terminate(&snapshot_at(0, 0.0, 0)));
    }
}
