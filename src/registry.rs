//! Name-keyed constructors.
//!
//! A [`Registry`] maps identifiers to constructors so that engines can be
//! assembled from configuration: a selection strategy named `"tournament"`,
//! a migration named `"ring"`, and so on. It is a plain value; nothing in the
//! crate keeps a global instance.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{GeneticError, Result};

type Constructor<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Constructors registered by name, kept in registration order.
pub struct Registry<V> {
    entries: Mutex<Vec<(String, Constructor<V>)>>,
}

impl<V> Registry<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Registers `constructor` under `name`.
    ///
    /// # Errors
    ///
    /// Returns a `Registry` error if `name` is empty or already taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        constructor: impl Fn() -> V + Send + Sync + 'static,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GeneticError::Registry("Name cannot be empty".to_string()));
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|(existing, _)| *existing == name) {
            return Err(GeneticError::Registry(format!(
                "'{}' is already registered",
                name
            )));
        }
        entries.push((name, Arc::new(constructor)));
        Ok(())
    }

    /// Constructs a new value with the constructor registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns a `Registry` error if nothing is registered under `name`.
    pub fn create(&self, name: &str) -> Result<V> {
        let constructor = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, constructor)| Arc::clone(constructor))
            .ok_or_else(|| GeneticError::Registry(format!("'{}' is not registered", name)))?;

        // Called outside the lock so constructors may use the registry.
        Ok(constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(existing, _)| existing == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}
