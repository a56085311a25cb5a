//! Benchmarks for student-registry
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use student_registry::{natural_cmp, ParallelRanker, Record, Registry};

fn sample_records(count: usize) -> Vec<Arc<Record<String, String>>> {
    // Reverse order so every run has real work to do
    (0..count)
        .rev()
        .map(|i| {
            let mut r = Record::new(format!("Student{}", i), format!("2020CS{}", 1000 + i), "CSE", 2020);
            r.add_completed_course("OOPD".to_string(), 7.0 + (i % 31) as f64 * 0.1);
            Arc::new(r)
        })
        .collect()
}

fn benchmark_parallel_rank(c: &mut Criterion) {
    let records = sample_records(20_000);
    let mut group = c.benchmark_group("parallel_rank");

    for workers in [1, 2, 4, 8] {
        let ranker = ParallelRanker::new(workers).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &records, |b, records| {
            b.iter(|| {
                let mut input = records.clone();
                let report = ranker.rank(&mut input).unwrap();
                black_box(report);
            })
        });
    }

    group.finish();
}

fn benchmark_natural_cmp(c: &mut Criterion) {
    c.bench_function("natural_cmp_roll_numbers", |b| {
        b.iter(|| natural_cmp(black_box("2020CS1999"), black_box("2020CS10000")))
    });
}

fn benchmark_registry_insert(c: &mut Criterion) {
    let records = sample_records(2_000);

    c.bench_function("registry_add_2000", |b| {
        b.iter(|| {
            let registry = Registry::new();
            registry.extend(records.iter().cloned());
            black_box(registry.size());
        })
    });
}

criterion_group!(
    benches,
    benchmark_parallel_rank,
    benchmark_natural_cmp,
    benchmark_registry_insert
);
criterion_main!(benches);
