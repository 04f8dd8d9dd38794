//! Benchmarks for simplification and evaluation of expression trees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use symalg::parallel::values_par;
use symalg::{add, mul, sub, Bindings, CalcOptions, Element, Variable};

/// Builds a left-leaning product of `depth` binomials in `x` and `y`.
fn nested_product(depth: usize) -> Element {
    (0..depth).fold(Element::ONE, |acc, i| {
        mul(acc, sub(add(Variable::X, i as f64), Variable::Y))
    })
}

fn bench_calc(c: &mut Criterion) {
    let mut group = c.benchmark_group("calc");

    for depth in [2, 4, 6] {
        let expr = nested_product(depth);
        let options = CalcOptions::default().with_max_passes(4);

        group.bench_with_input(BenchmarkId::new("single_pass", depth), &depth, |b, _| {
            b.iter(|| black_box(expr.calc()))
        });
        group.bench_with_input(BenchmarkId::new("fixed_point", depth), &depth, |b, _| {
            b.iter(|| black_box(expr.calc_with(&options)))
        });
    }

    group.finish();
}

fn bench_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("values");
    let expr = nested_product(6);

    for count in [64, 1024] {
        let contexts: Vec<Bindings> = (0..count)
            .map(|i| Bindings::new().with("x", i as f64).with("y", 0.5))
            .collect();

        group.bench_with_input(BenchmarkId::new("sequential", count), &count, |b, _| {
            b.iter(|| {
                let values: Vec<f64> = contexts
                    .iter()
                    .map(|bindings| expr.value(Some(bindings)).unwrap())
                    .collect();
                black_box(values)
            })
        });
        group.bench_with_input(BenchmarkId::new("rayon", count), &count, |b, _| {
            b.iter(|| black_box(values_par(&expr, &contexts).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calc, bench_values);
criterion_main!(benches);
