//! A regressor that has nothing to do with the target, and the tests that
//! expose it.
//!
//! The dataset's `x` is joined by a seeded 0/1 column `z` and a constant. OLS
//! happily assigns `z` a coefficient; F tests on `z = 0`, `const = 0` and both
//! together show which coefficients the data actually supports.

use crate::config::NUISANCE_SEED;
use crate::dataset::{binary_column, seeded_rng, Dataset};
use crate::error::Result;
use crate::inference::{DesignMatrix, FTestResult, Ols, OlsResults, Restriction};

/// Named coefficient of the nuisance column.
pub const NUISANCE_NAME: &str = "z";

/// A titled F test.
#[derive(Clone, Debug)]
pub struct HypothesisBlock {
    pub title: String,
    pub result: FTestResult,
}

/// Everything the lesson prints.
#[derive(Clone, Debug)]
pub struct SpuriousReport {
    pub nuisance: Vec<u8>,
    /// Fit on `[x, z, const]`.
    pub full: OlsResults,
    pub tests: Vec<HypothesisBlock>,
    /// Fit on `[x, const]` after dropping `z`.
    pub reduced: OlsResults,
}

/// Configuration of the nuisance-variable lesson.
#[derive(Clone, Debug)]
pub struct SpuriousRegressorExperiment {
    seed: u64,
    extra: Vec<(String, Vec<Restriction>)>,
}

impl Default for SpuriousRegressorExperiment {
    fn default() -> Self {
        Self::new()
    }
}

impl SpuriousRegressorExperiment {
    pub fn new() -> Self {
        Self {
            seed: NUISANCE_SEED,
            extra: Vec::new(),
        }
    }

    /// Set the seed of the nuisance column.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Adds a test block after the three standard ones.
    pub fn with_hypothesis(mut self, title: &str, restrictions: Vec<Restriction>) -> Self {
        self.extra.push((title.to_string(), restrictions));
        self
    }

    /// The design `[x, z, const]` for `data`, with `z` drawn from the seed.
    pub fn design(&self, data: &Dataset) -> Result<(DesignMatrix, Vec<u8>)> {
        let nuisance = binary_column(&mut seeded_rng(self.seed), data.len());
        let z: Vec<f64> = nuisance.iter().map(|&v| f64::from(v)).collect();
        let design = DesignMatrix::from_column("x", &data.xs())?
            .with_column(NUISANCE_NAME, &z)?
            .add_constant()?;
        Ok((design, nuisance))
    }

    pub fn run(&self, data: &Dataset) -> Result<SpuriousReport> {
        let (design, nuisance) = self.design(data)?;
        let y = data.targets();
        let full = Ols::fit(&design, &y)?;

        let standard = [
            (
                "Test the hypothesis that the coefficient of z equals 0:",
                vec!["z = 0"],
            ),
            (
                "Test the hypothesis that the coefficient of const equals 0:",
                vec!["const = 0"],
            ),
            (
                "Test the hypothesis that the coefficients of z and const both equal 0:",
                vec!["z = 0", "const = 0"],
            ),
        ];
        let mut tests = Vec::with_capacity(standard.len() + self.extra.len());
        for (title, hypotheses) in standard {
            tests.push(HypothesisBlock {
                title: title.to_string(),
                result: full.f_test_str(&hypotheses)?,
            });
        }
        for (title, restrictions) in &self.extra {
            tests.push(HypothesisBlock {
                title: title.clone(),
                result: full.f_test(restrictions)?,
            });
        }

        let reduced = Ols::fit(&design.drop_column(NUISANCE_NAME)?, &y)?;
        log::info!(
            "z coefficient {:.4} (p = {:.3}); reduced model R2 {:.4}",
            full.param(NUISANCE_NAME).unwrap_or(f64::NAN),
            tests[0].result.pvalue,
            reduced.rsquared
        );

        Ok(SpuriousReport {
            nuisance,
            full,
            tests,
            reduced,
        })
    }
}
