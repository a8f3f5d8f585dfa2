//! Ordinary least-squares linear regression.
//!
//! The model tracks its state in the type:
//! - [`LinearRegression`] = `LinearModel<Unfitted>`: configuration only.
//! - `LinearModel<Fitted>`: coefficients ready for prediction and persistence.
//!
//! Whether the model estimates its own intercept is an explicit flag. When the
//! design already carries a constant column (for example polynomial features
//! with a bias term) the flag must be turned off, otherwise the constant is
//! represented twice.
//!
//! ```rust
//! use linear_lab::model::{InferenceModel, LinearRegression};
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_row_slice(3, 1, &[0.0, 1.0, 2.0]);
//! let y = DVector::from_row_slice(&[1.0, 3.0, 5.0]);
//! let fitted = LinearRegression::new().fit(&x, &y).unwrap();
//! assert!((fitted.intercept() - 1.0).abs() < 1e-10);
//! assert!((fitted.predict(&[3.0]).unwrap() - 7.0).abs() < 1e-10);
//! ```

use crate::error::{LinearLabError, Result};
use crate::metrics::Evaluation;
use crate::model::solver::lstsq;
use crate::model::{Fitted, InferenceModel, Unfitted};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Hyperparameters of a linear regression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionConfig {
    /// Estimate a separate intercept by centering the design and target.
    pub fit_intercept: bool,
}

impl Default for LinearRegressionConfig {
    fn default() -> Self {
        Self {
            fit_intercept: true,
        }
    }
}

/// Estimated parameters of a linear model.
///
/// Also the serializable representation used by
/// [`InferenceModel::save_to_file`] and [`InferenceModel::load_from_file`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Numerical rank of the design seen by `fit`.
    pub rank: usize,
    pub config: LinearRegressionConfig,
}

/// A linear model with state encoded at the type level.
///
/// `predict` exists only on `LinearModel<Fitted>`.
#[derive(Clone, Debug)]
pub struct LinearModel<S> {
    config: LinearRegressionConfig,
    params: LinearParams,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        let config = LinearRegressionConfig::default();
        Self {
            config,
            params: LinearParams {
                coefficients: Vec::new(),
                intercept: 0.0,
                rank: 0,
                config,
            },
            _state: PhantomData,
        }
    }

    /// Set whether a separate intercept is estimated.
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.config.fit_intercept = fit_intercept;
        self.params.config = self.config;
        self
    }

    pub fn fit_intercept(&self) -> bool {
        self.config.fit_intercept
    }

    /// Estimates coefficients on design `x` (one row per sample) and target `y`.
    ///
    /// # Errors
    /// Propagates [`LinearLabError::EmptyData`], [`LinearLabError::ShapeMismatch`]
    /// and [`LinearLabError::Numerical`] from the solver.
    pub fn fit(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LinearModel<Fitted>> {
        let (rows, cols) = x.shape();
        if rows == 0 {
            return Err(LinearLabError::EmptyData(
                "cannot fit a linear model on zero samples".to_string(),
            ));
        }
        if y.len() != rows {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} targets", rows),
                got: format!("{} targets", y.len()),
            });
        }

        let (coefficients, intercept, rank) = if self.config.fit_intercept {
            let x_mean = x.row_mean();
            let y_mean = y.mean();
            let mut xc = x.clone();
            for (j, mut col) in xc.column_iter_mut().enumerate() {
                col.add_scalar_mut(-x_mean[j]);
            }
            let yc = y.add_scalar(-y_mean);
            let sol = lstsq(&xc, &yc)?;
            let intercept = y_mean - (&x_mean * &sol.coefficients)[0];
            (sol.coefficients, intercept, sol.rank)
        } else {
            let sol = lstsq(x, y)?;
            (sol.coefficients, 0.0, sol.rank)
        };

        log::debug!(
            "fitted linear model: {} samples, {} features, rank {}, fit_intercept={}",
            rows,
            cols,
            rank,
            self.config.fit_intercept
        );

        Ok(LinearModel {
            config: self.config,
            params: LinearParams {
                coefficients: coefficients.iter().copied().collect(),
                intercept,
                rank,
                config: self.config,
            },
            _state: PhantomData,
        })
    }
}

impl LinearModel<Fitted> {
    /// Creates a fitted model from explicit parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            config: params.config,
            params,
            _state: PhantomData,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.params.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.params.intercept
    }

    pub fn fit_intercept(&self) -> bool {
        self.config.fit_intercept
    }

    /// Numerical rank of the design the model was fitted on.
    pub fn rank(&self) -> usize {
        self.params.rank
    }

    /// Coefficient of determination of the predictions on `x` against `y`.
    pub fn score(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<f64> {
        Ok(self.evaluate(x, y)?.r_squared)
    }

    /// Mean squared error and R² of the predictions on `x` against `y`.
    pub fn evaluate(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<Evaluation> {
        let pred = self.predict_batch(x)?;
        Evaluation::compute(y.as_slice(), pred.as_slice())
    }

    fn check_width(&self, got: usize) -> Result<()> {
        let expected = self.params.coefficients.len();
        if got != expected {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} features", expected),
                got: format!("{} features", got),
            });
        }
        Ok(())
    }
}

/// Inference for a fitted linear model: `y = wᵀx + b`.
impl InferenceModel for LinearModel<Fitted> {
    type InputSingle = [f64];
    type OutputSingle = f64;
    type InputBatch = DMatrix<f64>;
    type OutputBatch = DVector<f64>;
    type ParamsRepr = LinearParams;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle> {
        self.check_width(input.len())?;
        let dot: f64 = self
            .params
            .coefficients
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.params.intercept)
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch> {
        self.check_width(input.ncols())?;
        let w = DVector::from_column_slice(&self.params.coefficients);
        Ok((input * w).add_scalar(self.params.intercept))
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        self.params.clone()
    }

    fn from_params(params: Self::ParamsRepr) -> Result<Self> {
        if params
            .coefficients
            .iter()
            .chain(std::iter::once(&params.intercept))
            .any(|v| !v.is_finite())
        {
            return Err(LinearLabError::InvalidParameter(
                "linear parameters must be finite".to_string(),
            ));
        }
        if params.rank > params.coefficients.len() {
            return Err(LinearLabError::InvalidParameter(format!(
                "rank {} exceeds {} coefficients",
                params.rank,
                params.coefficients.len()
            )));
        }
        if !params.config.fit_intercept && params.intercept != 0.0 {
            return Err(LinearLabError::InvalidParameter(
                "a model fitted without intercept cannot carry one".to_string(),
            ));
        }
        Ok(Self::new(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line_data() -> (DMatrix<f64>, DVector<f64>) {
        // y = 2x + 1
        let x = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0, 5.0, 7.0]);
        (x, y)
    }

    #[test]
    fn test_default_fits_intercept() {
        assert!(LinearRegression::new().fit_intercept());
        assert!(!LinearRegression::new().with_fit_intercept(false).fit_intercept());
    }

    #[test]
    fn test_fit_with_intercept() {
        let (x, y) = line_data();
        let fitted = LinearRegression::new().fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fitted.coefficients()[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fitted.intercept(), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fitted.score(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_without_intercept_goes_through_origin() {
        let (x, y) = line_data();
        let fitted = LinearRegression::new()
            .with_fit_intercept(false)
            .fit(&x, &y)
            .unwrap();
        assert_eq!(fitted.intercept(), 0.0);
        // Through-origin slope: sum(xy) / sum(x^2) = 34 / 14
        assert_abs_diff_eq!(fitted.coefficients()[0], 34.0 / 14.0, epsilon = 1e-10);
    }

    #[test]
    fn test_explicit_constant_column_matches_intercept_fit() {
        let (x, y) = line_data();
        let with_const = DMatrix::from_fn(4, 2, |r, c| if c == 0 { 1.0 } else { x[(r, 0)] });

        let implicit = LinearRegression::new().fit(&x, &y).unwrap();
        let explicit = LinearRegression::new()
            .with_fit_intercept(false)
            .fit(&with_const, &y)
            .unwrap();

        assert_abs_diff_eq!(explicit.coefficients()[0], implicit.intercept(), epsilon = 1e-10);
        assert_abs_diff_eq!(
            explicit.coefficients()[1],
            implicit.coefficients()[0],
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_constant_column_with_intercept_is_rank_deficient() {
        let (x, y) = line_data();
        let with_const = DMatrix::from_fn(4, 2, |r, c| if c == 0 { 1.0 } else { x[(r, 0)] });

        let fitted = LinearRegression::new().fit(&with_const, &y).unwrap();
        // Centering zeroes the constant column, so it carries no weight.
        assert_eq!(fitted.rank(), 1);
        assert_abs_diff_eq!(fitted.coefficients()[0], 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fitted.intercept(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_predict_single_and_batch_agree() {
        let params = LinearParams {
            coefficients: vec![2.0, 3.0],
            intercept: 1.0,
            rank: 2,
            config: LinearRegressionConfig::default(),
        };
        let model = LinearModel::<Fitted>::new(params);

        // y = 2*1 + 3*2 + 1 = 9
        assert_eq!(model.predict(&[1.0, 2.0]).unwrap(), 9.0);

        let batch = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]);
        assert_eq!(model.predict_batch(&batch).unwrap().as_slice(), &[9.0, 4.0]);
    }

    #[test]
    fn test_predict_width_mismatch() {
        let (x, y) = line_data();
        let fitted = LinearRegression::new().fit(&x, &y).unwrap();
        assert!(matches!(
            fitted.predict(&[1.0, 2.0]),
            Err(LinearLabError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_shape_mismatch() {
        let (x, _) = line_data();
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(LinearRegression::new().fit(&x, &y).is_err());
    }

    #[test]
    fn test_fit_empty() {
        let x = DMatrix::<f64>::zeros(0, 1);
        let y = DVector::<f64>::zeros(0);
        assert!(matches!(
            LinearRegression::new().fit(&x, &y),
            Err(LinearLabError::EmptyData(_))
        ));
    }

    #[test]
    fn test_from_params_rejects_intercept_without_flag() {
        let params = LinearParams {
            coefficients: vec![1.0],
            intercept: 0.5,
            rank: 1,
            config: LinearRegressionConfig {
                fit_intercept: false,
            },
        };
        assert!(LinearModel::<Fitted>::from_params(params).is_err());
    }

    #[test]
    fn test_from_params_rejects_rank_above_width() {
        let params = LinearParams {
            coefficients: vec![1.0],
            intercept: 0.0,
            rank: 2,
            config: LinearRegressionConfig::default(),
        };
        assert!(LinearModel::<Fitted>::from_params(params).is_err());
    }

    #[test]
    fn test_reloaded_model_keeps_deficient_rank() -> Result<()> {
        let (x, y) = line_data();
        let duplicated = DMatrix::from_fn(4, 2, |r, _| x[(r, 0)]);
        let fitted = LinearRegression::new().fit(&duplicated, &y)?;
        assert_eq!(fitted.rank(), 1);

        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("deficient.bin");
        fitted.save_to_file(&path)?;
        let loaded = LinearModel::<Fitted>::load_from_file(&path)?;
        assert_eq!(loaded.rank(), 1);
        assert_eq!(LinearModel::<Fitted>::from_params(fitted.extract_params())?.rank(), 1);
        Ok(())
    }

    #[test]
    fn test_linear_model_save_load() -> Result<()> {
        let (x, y) = line_data();
        let fitted = LinearRegression::new().fit(&x, &y)?;

        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("model.bin");
        fitted.save_to_file(&path)?;
        let loaded = LinearModel::<Fitted>::load_from_file(&path)?;

        assert_eq!(loaded.extract_params(), fitted.extract_params());
        assert_eq!(loaded.predict(&[10.0])?, fitted.predict(&[10.0])?);
        Ok(())
    }
}
