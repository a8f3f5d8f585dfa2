//! Shared inputs for the linear-lab benchmarks.

use linear_lab::dataset::{Dataset, NoisyLineGenerator};
use linear_lab::inference::DesignMatrix;
use nalgebra::DVector;

/// `n` points of `y = x + ε` starting at `x = 10`.
pub fn noisy_line(n: usize, seed: u64) -> Dataset {
    let xs: Vec<f64> = (0..n).map(|i| 10.0 + i as f64).collect();
    NoisyLineGenerator::new()
        .with_xs(xs)
        .generate_seeded(seed)
        .expect("unit noise is a valid distribution")
}

/// Design `[x, const]` and target for `data`.
pub fn line_design(data: &Dataset) -> (DesignMatrix, DVector<f64>) {
    let design = DesignMatrix::from_column("x", &data.xs())
        .and_then(DesignMatrix::add_constant)
        .expect("fresh design has no constant yet");
    (design, data.targets())
}
