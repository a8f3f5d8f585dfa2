use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linear_lab::metrics::{mean_squared_error, r_squared};

fn bench_mse(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("mse", size), size, |b, &n| {
            let y_true: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
            let y_pred: Vec<f64> = (0..n).map(|i| i as f64 * 0.1 + 0.5).collect();

            b.iter(|| {
                let mse = mean_squared_error(black_box(&y_true), black_box(&y_pred)).unwrap();
                black_box(mse);
            });
        });
    }
}

fn bench_r_squared(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("r_squared", size), size, |b, &n| {
            let y_true: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
            let y_pred: Vec<f64> = (0..n).map(|i| i as f64 * 0.1 + 0.5).collect();

            b.iter(|| {
                let r2 = r_squared(black_box(&y_true), black_box(&y_pred)).unwrap();
                black_box(r2);
            });
        });
    }
}

criterion_group!(benches, bench_mse, bench_r_squared);
criterion_main!(benches);
