//! Regression metrics.

use crate::error::{LinearLabError, Result};
use serde::{Deserialize, Serialize};

/// Mean squared error and coefficient of determination against one data slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mse: f64,
    pub r_squared: f64,
}

impl Evaluation {
    /// Computes both metrics for `y_true` against `y_pred`.
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Result<Self> {
        Ok(Self {
            mse: mean_squared_error(y_true, y_pred)?,
            r_squared: r_squared(y_true, y_pred)?,
        })
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mse: {:.3}\nR2: {:.3}", self.mse, self.r_squared)
    }
}

fn check_lengths(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(LinearLabError::ShapeMismatch {
            expected: format!("{} predictions", y_true.len()),
            got: format!("{} predictions", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(LinearLabError::EmptyData(
            "cannot evaluate against an empty slice".to_string(),
        ));
    }
    Ok(())
}

/// MSE = mean((y_true - y_pred)^2)
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    Ok(residual_sum_of_squares(y_true, y_pred) / y_true.len() as f64)
}

/// R² = 1 - SS_res / SS_tot
///
/// A constant `y_true` has `SS_tot = 0`; R² is then 1.0 for a perfect
/// prediction and 0.0 otherwise. Values below zero mean the model does worse
/// than predicting the mean.
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res = residual_sum_of_squares(y_true, y_pred);
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

fn residual_sum_of_squares(y_true: &[f64], y_pred: &[f64]) -> f64 {
    y_true
        .iter()
        .zip(y_pred)
        .map(|(&t, &p)| (t - p).powi(2))
        .sum()
}
