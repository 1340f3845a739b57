//! # Observers
//!
//! Observers are push-only callbacks that receive a [`PopulationSnapshot`]
//! once per generation (engines) or once per epoch (island coordinator).
//! They run on the thread that owns the run and must return promptly: a slow
//! observer delays the next generation.
//!
//! [`ObserverRegistry`] holds the registered observers. Registration and
//! removal are safe from any thread; each notification iterates over a
//! snapshot of the registry taken when the notification starts.

use std::sync::{Arc, PoisonError, RwLock};

use crate::stats::PopulationSnapshot;

/// Receives one snapshot per generation (or per epoch for island runs).
pub trait EvolutionObserver<T>: Send + Sync {
    fn population_update(&self, snapshot: &PopulationSnapshot<T>);
}

/// An observer of island runs.
///
/// In addition to the per-epoch aggregate update it receives every
/// per-generation update of every island, tagged with the island's
/// zero-based index.
pub trait IslandEvolutionObserver<T>: EvolutionObserver<T> {
    fn island_population_update(&self, island_index: usize, snapshot: &PopulationSnapshot<T>);
}

/// A concurrency-safe list of observers.
pub struct ObserverRegistry<O: ?Sized> {
    observers: RwLock<Vec<Arc<O>>>,
}

impl<O: ?Sized> ObserverRegistry<O> {
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Registers `observer`. Registering the same `Arc` twice is a no-op.
    pub fn add(&self, observer: Arc<O>) {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        if !observers.iter().any(|existing| Arc::ptr_eq(existing, &observer)) {
            observers.push(observer);
        }
    }

    /// Removes `observer`, returning whether it was registered.
    pub fn remove(&self, observer: &Arc<O>) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|existing| !Arc::ptr_eq(existing, observer));
        observers.len() != before
    }

    /// A stable copy of the current registrations.
    pub fn snapshot(&self) -> Vec<Arc<O>> {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.observers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<O: ?Sized> Default for ObserverRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObserverRegistry<dyn EvolutionObserver<T>> {
    pub fn notify(&self, snapshot: &PopulationSnapshot<T>) {
        for observer in self.snapshot() {
            observer.population_update(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counter(AtomicUsize);

    impl EvolutionObserver<u8> for Counter {
        fn population_update(&self, _snapshot: &PopulationSnapshot<u8>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn snapshot() -> PopulationSnapshot<u8> {
        PopulationSnapshot::new("p", 0, 1.0, 1.0, 0.0, true, 1, 0, 0, Duration::ZERO)
    }

    #[test]
    fn test_add_notify_remove() {
        let registry: ObserverRegistry<dyn EvolutionObserver<u8>> = ObserverRegistry::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let as_observer: Arc<dyn EvolutionObserver<u8>> = counter.clone();

        registry.add(as_observer.clone());
        registry.add(as_observer.clone());
        assert_eq!(registry.len(), 1);

        registry.notify(&snapshot());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);

        assert!(registry.remove(&as_observer));
        assert!(!registry.remove(&as_observer));
        assert!(registry.is_empty());

        registry.notify(&snapshot());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry: Arc<ObserverRegistry<dyn EvolutionObserver<u8>>> =
            Arc::new(ObserverRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let observer: Arc<dyn EvolutionObserver<u8>> =
                        Arc::new(Counter(AtomicUsize::new(0)));
                    registry.add(observer);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
    }
}
