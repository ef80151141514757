//! Criterion benchmarks for u-autonomy.
//!
//! Uses synthetic instances: evenly spaced operations with overlapping
//! windows over a horizon cut into equal intervals.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_autonomy::model::{Operation, Partition};
use u_autonomy::objective::{autonomy, is_feasible, AutonomyFormulation};
use u_autonomy::sa::{AnnealingConfig, AnnealingOptimizer, NullSink};

// ===========================================================================
// Synthetic instances
// ===========================================================================

/// `n` operations with windows of length 3 spaced one unit apart, and a
/// partition of the horizon into intervals of length 4.
fn instance(n: usize) -> (Vec<Operation>, Partition) {
    let operations = (0..n)
        .map(|k| {
            let c = k as f64;
            Operation::new(c, c + 3.0, 1.0 + (k % 3) as f64 * 0.5, 1.0).unwrap()
        })
        .collect();
    let horizon = n as f64 + 3.0;
    let intervals = (horizon / 4.0).ceil() as usize;
    let cuts = (0..=intervals).map(|i| i as f64 * 4.0).collect();
    (operations, Partition::new(cuts).unwrap())
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("objective");

    for &n in &[10usize, 100, 1000] {
        let (operations, partition) = instance(n);
        group.bench_with_input(
            BenchmarkId::new("autonomy", n),
            &(operations.clone(), partition.clone()),
            |b, (ops, p)| {
                b.iter(|| {
                    black_box(autonomy(
                        black_box(p),
                        black_box(ops),
                        AutonomyFormulation::Overlap,
                    ))
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("is_feasible", n),
            &(operations, partition),
            |b, (ops, p)| b.iter(|| black_box(is_feasible(black_box(p), black_box(ops)))),
        );
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for &n in &[10usize, 50, 100] {
        let (operations, partition) = instance(n);
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_final_temperature(0.1)
            .with_cooling_rate(0.9)
            .with_iterations_per_temperature(50)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(operations, partition, config),
            |b, (ops, p, cfg)| {
                b.iter(|| {
                    let mut sink = NullSink;
                    let mut optimizer =
                        AnnealingOptimizer::new(ops.clone(), p.clone(), cfg.clone(), &mut sink)
                            .unwrap();
                    black_box(optimizer.optimize())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_objective, bench_anneal);
criterion_main!(benches);
