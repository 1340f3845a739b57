#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use islandga::{
    CandidateFactory, EvolutionObserver, EvolutionaryOperator, FitnessEvaluator,
    IslandEvolutionObserver, PopulationSnapshot, RandomNumberGenerator,
};
use rand::Rng;

pub const TARGET: i64 = 50;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Integers in `0..100`.
pub struct Integers;

impl CandidateFactory<i64> for Integers {
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> i64 {
        rng.gen_range(0..100)
    }
}

/// Distance from [`TARGET`]; lower is fitter.
pub struct Distance;

impl FitnessEvaluator<i64> for Distance {
    fn fitness(&self, candidate: &i64, _population: &[i64]) -> f64 {
        (candidate - TARGET).abs() as f64
    }

    fn is_natural(&self) -> bool {
        false
    }
}

/// Moves every candidate by up to three in either direction.
pub struct Nudge;

impl EvolutionaryOperator<i64> for Nudge {
    fn apply(&self, selected: Vec<i64>, rng: &mut RandomNumberGenerator) -> Vec<i64> {
        selected
            .into_iter()
            .map(|x| x + rng.gen_range(-3..=3))
            .collect()
    }
}

/// Records every snapshot it receives.
#[derive(Default)]
pub struct Recorder {
    pub generations: Mutex<Vec<usize>>,
    pub best: Mutex<Vec<f64>>,
    pub sizes: Mutex<Vec<usize>>,
}

impl Recorder {
    pub fn count(&self) -> usize {
        self.generations.lock().unwrap().len()
    }
}

impl EvolutionObserver<i64> for Recorder {
    fn population_update(&self, snapshot: &PopulationSnapshot<i64>) {
        self.generations.lock().unwrap().push(snapshot.generation_number());
        self.best.lock().unwrap().push(snapshot.best_fitness());
        self.sizes.lock().unwrap().push(snapshot.population_size());
    }
}

/// Counts aggregate updates and per-island updates.
pub struct IslandCounter {
    pub aggregate: AtomicUsize,
    pub per_island: Vec<AtomicUsize>,
}

impl IslandCounter {
    pub fn new(island_count: usize) -> Self {
        Self {
            aggregate: AtomicUsize::new(0),
            per_island: (0..island_count).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    pub fn island(&self, index: usize) -> usize {
        self.per_island[index].load(Ordering::SeqCst)
    }
}

impl EvolutionObserver<i64> for IslandCounter {
    fn population_update(&self, _snapshot: &PopulationSnapshot<i64>) {
        self.aggregate.fetch_add(1, Ordering::SeqCst);
    }
}

impl IslandEvolutionObserver<i64> for IslandCounter {
    fn island_population_update(&self, island_index: usize, _snapshot: &PopulationSnapshot<i64>) {
        self.per_island[island_index].fetch_add(1, Ordering::SeqCst);
    }
}
