//! Exchange of individuals between islands at epoch boundaries.
//!
//! A migration receives every island's population, sorted fittest first,
//! and moves individuals between them in place. Both built-in policies keep
//! each island's size unchanged when all islands have the same size.

use std::fmt::Debug;

use rand::seq::SliceRandom;

use crate::candidate::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;

pub trait Migration<T>: Debug + Send + Sync {
    /// Moves up to `migrant_count` individuals out of and into each island.
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        rng: &mut RandomNumberGenerator,
    );
}

/// Island `i` sends its `migrant_count` fittest individuals to island
/// `(i + 1) % K`, which appends them. Deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingMigration;

impl<T: Send + Sync> Migration<T> for RingMigration {
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        _rng: &mut RandomNumberGenerator,
    ) {
        if islands.is_empty() || migrant_count == 0 {
            return;
        }

        let emigrants: Vec<Vec<_>> = islands
            .iter_mut()
            .map(|island| {
                let count = migrant_count.min(island.len());
                island.drain(..count).collect()
            })
            .collect();

        let island_count = islands.len();
        for (index, group) in emigrants.into_iter().enumerate() {
            islands[(index + 1) % island_count].extend(group);
        }
    }
}

/// Every island gives up `migrant_count` random individuals. The migrants
/// are pooled, shuffled and dealt back `migrant_count` per island, so an
/// individual may land on any island, including the one it left.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMigration;

impl<T: Send + Sync> Migration<T> for RandomMigration {
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        rng: &mut RandomNumberGenerator,
    ) {
        if islands.is_empty() || migrant_count == 0 {
            return;
        }

        let mut migrants = Vec::with_capacity(migrant_count * islands.len());
        for island in islands.iter_mut() {
            island.shuffle(rng);
            let keep = island.len().saturating_sub(migrant_count);
            migrants.extend(island.drain(keep..));
        }
        migrants.shuffle(rng);

        let mut migrants = migrants.into_iter();
        for island in islands.iter_mut() {
            island.extend(migrants.by_ref().take(migrant_count));
        }
    }
}
