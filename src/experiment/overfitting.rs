//! Polynomial degree sweep contrasting in-sample fit with generalization.
//!
//! For each degree two models are fitted on `[1, x, ..., x^d]`:
//! - the *generalization* model on the training prefix, scored on the
//!   held-out suffix;
//! - the *in-sample* model on the whole dataset, scored on the same data.
//!
//! The bias column comes from the featurizer, so the regression runs with
//! `fit_intercept = false`.

use crate::config::{DEGREES, TRAIN_ROWS};
use crate::dataset::Dataset;
use crate::error::{LinearLabError, Result};
use crate::metrics::Evaluation;
use crate::model::{Fitted, InferenceModel, LinearModel, LinearParams, LinearRegression};
use crate::preprocessing::{
    FittedPolynomialFeatures, FittedTransformer, PolynomialFeatures, PolynomialFeaturesParams,
    Transformer,
};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Polynomial featurizer followed by a linear model without its own intercept.
#[derive(Clone, Debug)]
pub struct PolynomialModel {
    features: FittedPolynomialFeatures,
    regression: LinearModel<Fitted>,
}

/// Serializable form of a [`PolynomialModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolynomialModelParams {
    pub features: PolynomialFeaturesParams,
    pub regression: LinearParams,
}

impl PolynomialModel {
    /// Expands `x` to degree `degree` with a bias column and fits `y` on it.
    pub fn fit(degree: usize, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self> {
        let features = PolynomialFeatures::new()
            .with_degree(degree)
            .with_include_bias(true)
            .fit(x)?;
        let regression = LinearRegression::new()
            .with_fit_intercept(false)
            .fit(&features.transform(x)?, y)?;
        Ok(Self {
            features,
            regression,
        })
    }

    pub fn degree(&self) -> usize {
        self.features.degree()
    }

    /// Weights of `1, x, ..., x^d` in that order.
    pub fn coefficients(&self) -> &[f64] {
        self.regression.coefficients()
    }

    /// Predictions at each of `xs`.
    pub fn predict_xs(&self, xs: &[f64]) -> Result<Vec<f64>> {
        let x = DMatrix::from_column_slice(xs.len(), 1, xs);
        Ok(self.predict_batch(&x)?.iter().copied().collect())
    }

    /// Mean squared error and R² on `data`.
    pub fn evaluate(&self, data: &Dataset) -> Result<Evaluation> {
        let (x, y) = data.to_columns();
        let pred = self.predict_batch(&x)?;
        Evaluation::compute(y.as_slice(), pred.as_slice())
    }
}

impl InferenceModel for PolynomialModel {
    type InputSingle = [f64];
    type OutputSingle = f64;
    type InputBatch = DMatrix<f64>;
    type OutputBatch = DVector<f64>;
    type ParamsRepr = PolynomialModelParams;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle> {
        self.regression.predict(&self.features.transform_row(input)?)
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch> {
        self.regression
            .predict_batch(&self.features.transform(input)?)
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        PolynomialModelParams {
            features: self.features.extract_params(),
            regression: self.regression.extract_params(),
        }
    }

    fn from_params(params: Self::ParamsRepr) -> Result<Self> {
        let features = FittedPolynomialFeatures::from_params(params.features)?;
        let regression = LinearModel::<Fitted>::from_params(params.regression)?;
        if regression.coefficients().len() != features.n_features_out() {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} coefficients", features.n_features_out()),
                got: format!("{} coefficients", regression.coefficients().len()),
            });
        }
        Ok(Self {
            features,
            regression,
        })
    }
}

/// Outcome of one degree of the sweep.
#[derive(Clone, Debug)]
pub struct DegreeResult {
    pub degree: usize,
    /// Training-prefix model scored on the held-out suffix.
    pub generalization: Evaluation,
    /// Full-data model scored on the full data.
    pub in_sample: Evaluation,
    pub generalization_model: PolynomialModel,
    pub in_sample_model: PolynomialModel,
}

/// Which of the two models of a [`DegreeResult`] to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    InSample,
    Generalization,
}

impl Regime {
    pub fn title(self) -> &'static str {
        match self {
            Regime::InSample => "fitted and scored on all data",
            Regime::Generalization => "fitted on training rows, scored on test rows",
        }
    }
}

impl DegreeResult {
    pub fn model(&self, regime: Regime) -> &PolynomialModel {
        match regime {
            Regime::InSample => &self.in_sample_model,
            Regime::Generalization => &self.generalization_model,
        }
    }

    pub fn evaluation(&self, regime: Regime) -> Evaluation {
        match regime {
            Regime::InSample => self.in_sample,
            Regime::Generalization => self.generalization,
        }
    }
}

/// JSON row of a [`SweepReport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DegreeSummary {
    pub degree: usize,
    pub generalization: Evaluation,
    pub in_sample: Evaluation,
    pub generalization_coefficients: Vec<f64>,
    pub in_sample_coefficients: Vec<f64>,
}

/// Full result of [`OverfittingExperiment::run`], one entry per degree.
#[derive(Clone, Debug)]
pub struct SweepReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub entries: Vec<DegreeResult>,
}

impl SweepReport {
    pub fn summaries(&self) -> Vec<DegreeSummary> {
        self.entries
            .iter()
            .map(|e| DegreeSummary {
                degree: e.degree,
                generalization: e.generalization,
                in_sample: e.in_sample,
                generalization_coefficients: e.generalization_model.coefficients().to_vec(),
                in_sample_coefficients: e.in_sample_model.coefficients().to_vec(),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summaries())?)
    }

    /// Writes [`to_json`](Self::to_json) to `path`, creating parent directories.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("wrote sweep report to {}", path.display());
        Ok(())
    }
}

/// Configuration of the degree sweep.
#[derive(Clone, Debug)]
pub struct OverfittingExperiment {
    train_rows: usize,
    degrees: Vec<usize>,
}

impl Default for OverfittingExperiment {
    fn default() -> Self {
        Self::new()
    }
}

impl OverfittingExperiment {
    /// First 15 rows for training, degrees 1, 4, 7 and 10.
    pub fn new() -> Self {
        Self {
            train_rows: TRAIN_ROWS,
            degrees: DEGREES.to_vec(),
        }
    }

    /// Set the size of the training prefix.
    pub fn with_train_rows(mut self, train_rows: usize) -> Self {
        self.train_rows = train_rows;
        self
    }

    /// Set the degrees to compare.
    pub fn with_degrees(mut self, degrees: Vec<usize>) -> Self {
        self.degrees = degrees;
        self
    }

    pub fn train_rows(&self) -> usize {
        self.train_rows
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Splits `data` into the training prefix and the test suffix.
    pub fn split(&self, data: &Dataset) -> (Dataset, Dataset) {
        data.split_at(self.train_rows)
    }

    /// Runs the sweep on `data`.
    ///
    /// # Errors
    /// - [`LinearLabError::InvalidParameter`] without degrees
    /// - [`LinearLabError::EmptyData`] if the training prefix or the test
    ///   suffix is empty
    /// - any fit or evaluation error
    pub fn run(&self, data: &Dataset) -> Result<SweepReport> {
        if self.degrees.is_empty() {
            return Err(LinearLabError::InvalidParameter(
                "the sweep needs at least one degree".to_string(),
            ));
        }
        let (train, test) = self.split(data);
        if train.is_empty() {
            return Err(LinearLabError::EmptyData("training slice is empty".to_string()));
        }
        if test.is_empty() {
            return Err(LinearLabError::EmptyData(format!(
                "test slice is empty: {} rows and {} used for training",
                data.len(),
                self.train_rows
            )));
        }

        let (train_x, train_y) = train.to_columns();
        let (all_x, all_y) = data.to_columns();

        let mut entries = Vec::with_capacity(self.degrees.len());
        for &degree in &self.degrees {
            let generalization_model = PolynomialModel::fit(degree, &train_x, &train_y)?;
            let generalization = generalization_model.evaluate(&test)?;

            let in_sample_model = PolynomialModel::fit(degree, &all_x, &all_y)?;
            let in_sample = in_sample_model.evaluate(data)?;

            log::info!(
                "degree {:>2}: test mse {:.3} R2 {:.3} | full-data mse {:.3} R2 {:.3}",
                degree,
                generalization.mse,
                generalization.r_squared,
                in_sample.mse,
                in_sample.r_squared
            );

            entries.push(DegreeResult {
                degree,
                generalization,
                in_sample,
                generalization_model,
                in_sample_model,
            });
        }

        Ok(SweepReport {
            train_rows: train.len(),
            test_rows: test.len(),
            entries,
        })
    }
}
