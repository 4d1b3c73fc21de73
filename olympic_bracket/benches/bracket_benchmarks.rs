use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use olympic_bracket::bracket::builder::plan_bracket;

/// Benchmark bracket planning across roster sizes, including an awkward
/// just-past-a-power-of-two roster that maximizes padding.
fn bench_plan_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_bracket");
    for entrants in [8usize, 65, 512, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(entrants),
            &entrants,
            |b, &n| {
                b.iter(|| plan_bracket(n).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_plan_bracket);
criterion_main!(benches);
