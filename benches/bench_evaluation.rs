use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use islandga::evaluation::{run_batch, EvaluationPool};

// Deliberately uneven work per candidate
fn score(candidate: &u64) -> islandga::Result<f64> {
    let rounds = 200 + (candidate % 7) * 50;
    let mut x = *candidate as f64;
    for _ in 0..rounds {
        x = (x * 1.000_1).sin().abs() + 1.0;
    }
    Ok(x)
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_evaluation");

    for size in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<u64> = (0..*size).collect();

        group.bench_with_input(BenchmarkId::new("single_threaded", size), &candidates, |b, candidates| {
            b.iter(|| run_batch(true, black_box(candidates), score).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("shared_pool", size), &candidates, |b, candidates| {
            b.iter(|| run_batch(false, black_box(candidates), score).unwrap())
        });
    }

    group.finish();
}

fn bench_pool_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_size");
    let candidates: Vec<u64> = (0..2000).collect();

    for threads in [1, 2, 4, 8].iter() {
        let pool = EvaluationPool::new(*threads).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &candidates, |b, candidates| {
            b.iter(|| pool.evaluate(black_box(candidates), score).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_evaluation, bench_pool_sizes);
criterion_main!(benches);
