use benchmarks::noisy_line;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linear_lab::experiment::{OverfittingExperiment, PolynomialModel};

fn bench_degree_sweep(c: &mut Criterion) {
    let data = noisy_line(20, 4889);
    let experiment = OverfittingExperiment::new();

    c.bench_function("degree_sweep", |b| {
        b.iter(|| {
            let report = experiment.run(black_box(&data)).unwrap();
            black_box(report);
        });
    });
}

fn bench_polynomial_fit(c: &mut Criterion) {
    let (x, y) = noisy_line(20, 4889).to_columns();

    for degree in [1usize, 4, 7, 10].iter() {
        c.bench_with_input(BenchmarkId::new("polynomial_fit", degree), degree, |b, &d| {
            b.iter(|| {
                let model = PolynomialModel::fit(d, black_box(&x), black_box(&y)).unwrap();
                black_box(model);
            });
        });
    }
}

criterion_group!(benches, bench_degree_sweep, bench_polynomial_fit);
criterion_main!(benches);
