//! Benchmarks for namespace hierarchy computation.

use apidoc_site::namespace_hierarchy;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Generate `count` dotted namespace names spread over a few levels.
fn generate_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("app.module{}.section{}.core", i / 10, i % 10))
        .collect()
}

fn bench_namespace_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("namespace_hierarchy");

    for count in [10, 100, 1000] {
        let names = generate_names(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| namespace_hierarchy(names.iter().map(String::as_str)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_namespace_hierarchy);
criterion_main!(benches);
