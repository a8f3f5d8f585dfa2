//! Seeded synthetic data.
//!
//! Every random draw comes from a source passed in by the caller; nothing here
//! touches a global generator. Building two sources with the same seed gives
//! identical output.

use super::{Dataset, Observation};
use crate::config::GENERATOR_SEED;
use crate::error::{LinearLabError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Builds a locally scoped, reproducible random source.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator of `y = x + ε` with Gaussian `ε` rounded to a fixed precision.
#[derive(Clone, Debug)]
pub struct NoisyLineGenerator {
    xs: Vec<f64>,
    noise_std: f64,
    decimals: u32,
}

impl Default for NoisyLineGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoisyLineGenerator {
    /// Twenty points on `x = [10, 10, 11, ..., 28]`, unit noise, 2 decimals.
    pub fn new() -> Self {
        let xs = std::iter::once(10.0)
            .chain((10..=28).map(f64::from))
            .collect();
        Self {
            xs,
            noise_std: 1.0,
            decimals: 2,
        }
    }

    /// Set the `x` positions to generate at.
    pub fn with_xs(mut self, xs: Vec<f64>) -> Self {
        self.xs = xs;
        self
    }

    /// Set the standard deviation of the noise.
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Set how many decimals the noise is rounded to.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Draws one noise value per `x` from `rng`.
    ///
    /// # Errors
    /// [`LinearLabError::InvalidParameter`] if the noise standard deviation is
    /// negative or not finite.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset> {
        if self.noise_std.is_nan() || self.noise_std < 0.0 {
            return Err(LinearLabError::InvalidParameter(format!(
                "noise standard deviation must be non-negative, got {}",
                self.noise_std
            )));
        }
        let normal = Normal::new(0.0, self.noise_std).map_err(|e| {
            LinearLabError::InvalidParameter(format!(
                "noise standard deviation {}: {}",
                self.noise_std, e
            ))
        })?;

        Ok(self
            .xs
            .iter()
            .map(|&x| {
                let noise = round_to(normal.sample(rng), self.decimals);
                Observation::new(x, x + noise)
            })
            .collect())
    }

    /// Convenience wrapper around [`generate`](Self::generate) with a fresh
    /// source seeded by `seed`.
    pub fn generate_seeded(&self, seed: u64) -> Result<Dataset> {
        self.generate(&mut seeded_rng(seed))
    }

    /// The lesson's dataset: default positions with [`GENERATOR_SEED`].
    pub fn lesson_dataset() -> Result<Dataset> {
        Self::new().generate_seeded(GENERATOR_SEED)
    }
}

/// Draws `n` integers uniformly from `{0, 1}`.
pub fn binary_column<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u8> {
    (0..n).map(|_| rng.random_range(0..2u8)).collect()
}

/// Rounds half-to-even at `decimals` places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
