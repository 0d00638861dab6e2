//! Benchmarks for the generation engine, the core hot path.
//!
//! Measures rows-per-second throughput for `generate_table` across
//! record counts, column counts and source-kind mixes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use datasmith_core::generate::engine::{execute_run_with_rng, generate_table, GenerationRun};
use datasmith_core::rules::types::{RuleSet, RunMode};
use datasmith_core::AppendRule;
use datasmith_testutil::*;

/// N independent weighted-random columns.
fn random_rules(num_columns: usize) -> RuleSet {
    let specs: Vec<_> = (0..num_columns)
        .map(|i| {
            random(
                &format!("col_{}", i),
                "str",
                &["red", "blue", "green", "black", "white"],
                &[25, 20, 20, 20, 15],
            )
        })
        .collect();
    RuleSet::build(&specs).unwrap()
}

fn bench_record_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/sales_pipeline");
    let rules = RuleSet::build(&sales_pipeline_specs()).unwrap();

    for row_count in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &row_count,
            |b, &rows| {
                let mut rng = seeded_rng(42);
                b.iter(|| {
                    generate_table(&rules, rows, &mut rng, None).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_column_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/column_count");
    let row_count = 1000;

    for col_count in [5, 10, 20] {
        let rules = random_rules(col_count);
        group.throughput(Throughput::Elements(row_count as u64));
        group.bench_with_input(
            BenchmarkId::new("cols", col_count),
            &col_count,
            |b, _| {
                let mut rng = seeded_rng(42);
                b.iter(|| {
                    generate_table(&rules, row_count, &mut rng, None).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_text_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/text");
    let rules = RuleSet::build(&[
        row_index("id"),
        text("name", "name"),
        text("email", "email"),
        text("city", "city"),
    ])
    .unwrap();

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("faker_10k", |b| {
        let mut rng = seeded_rng(42);
        b.iter(|| {
            generate_table(&rules, 10_000, &mut rng, None).unwrap();
        });
    });
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/full_run");
    let rules = RuleSet::build(&sales_pipeline_specs()).unwrap();
    let mut run = GenerationRun::new(rules, 5000);
    run.mode = RunMode::Append;
    run.append = AppendRule::build_all(&[
        replace(7, Some("Product_Name"), "20", "Pendrive"),
        generate_random("Channel", &["Direct", "Partner"], 0.1),
    ])
    .unwrap();

    group.throughput(Throughput::Elements(5000));
    group.bench_function("append_5k", |b| {
        let mut rng = seeded_rng(42);
        b.iter(|| {
            execute_run_with_rng(&run, &mut rng, None).unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_record_count,
    bench_column_count,
    bench_text_columns,
    bench_full_run
);
criterion_main!(benches);
