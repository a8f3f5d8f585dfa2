//! Least-squares solver.
//!
//! Solves `minimize ||y - X b||²` for a tall or square design. Columns are
//! first scaled to unit Euclidean norm, which keeps high-degree polynomial
//! designs (columns ranging from `1` to `28^10`) well inside double
//! precision. The scaled system is solved by SVD. Singular values below
//! `eps · max(rows, cols) · σ_max` are dropped, so a rank-deficient design
//! yields the minimum-norm solution instead of an overflow.

use crate::error::{LinearLabError, Result};
use nalgebra::{DMatrix, DVector};

/// Result of a least-squares solve, expressed in the original column units.
#[derive(Clone, Debug)]
pub struct LstsqSolution {
    /// Estimated coefficients, one per design column.
    pub coefficients: DVector<f64>,
    /// Numerical rank of the design.
    pub rank: usize,
    /// Singular values of the column-scaled design, in decreasing order.
    pub singular_values: DVector<f64>,
    /// Pseudo-inverse of `XᵀX`; multiply by the residual variance to get the
    /// coefficient covariance.
    pub normalized_covariance: DMatrix<f64>,
}

/// Solves the least-squares problem for `x` and `y`.
///
/// # Errors
/// - [`LinearLabError::EmptyData`] if the design has no rows or no columns
/// - [`LinearLabError::ShapeMismatch`] if `y` does not have one entry per row
/// - [`LinearLabError::Numerical`] if the design or the solution is not finite
pub fn lstsq(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LstsqSolution> {
    let (rows, cols) = x.shape();
    if rows == 0 || cols == 0 {
        return Err(LinearLabError::EmptyData(format!(
            "cannot solve least squares for a {}x{} design",
            rows, cols
        )));
    }
    if y.len() != rows {
        return Err(LinearLabError::ShapeMismatch {
            expected: format!("{} targets", rows),
            got: format!("{} targets", y.len()),
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(LinearLabError::Numerical(
            "design or target contains non-finite values".to_string(),
        ));
    }

    // Zero columns keep scale 1 and end up with a zero coefficient.
    let scales: Vec<f64> = x
        .column_iter()
        .map(|c| {
            let n = c.norm();
            if n > 0.0 {
                1.0 / n
            } else {
                1.0
            }
        })
        .collect();
    let mut scaled = x.clone();
    for (j, &s) in scales.iter().enumerate() {
        for v in scaled.column_mut(j).iter_mut() {
            *v *= s;
        }
    }

    let svd = scaled.svd(true, true);
    let sigma_max = svd.singular_values.max();
    let tol = f64::EPSILON * rows.max(cols) as f64 * sigma_max;

    let beta_scaled = svd
        .solve(y, tol)
        .map_err(|e| LinearLabError::Numerical(format!("SVD solve failed: {}", e)))?;

    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| LinearLabError::Numerical("SVD did not produce V".to_string()))?;

    let mut rank = 0;
    let mut cov_scaled = DMatrix::<f64>::zeros(cols, cols);
    for (k, &sigma) in svd.singular_values.iter().enumerate() {
        if sigma > tol {
            rank += 1;
            let v_k = v_t.row(k).transpose();
            cov_scaled += (&v_k * v_k.transpose()) / (sigma * sigma);
        }
    }

    let coefficients = DVector::from_iterator(
        cols,
        beta_scaled.iter().zip(&scales).map(|(b, s)| b * s),
    );
    if coefficients.iter().any(|v| !v.is_finite()) {
        return Err(LinearLabError::Numerical(
            "least-squares solution is not finite".to_string(),
        ));
    }

    let normalized_covariance = DMatrix::from_fn(cols, cols, |i, j| {
        cov_scaled[(i, j)] * scales[i] * scales[j]
    });

    log::debug!(
        "lstsq: {}x{} design, rank {}, condition {:.3e}",
        rows,
        cols,
        rank,
        condition_number(&svd.singular_values, tol)
    );

    Ok(LstsqSolution {
        coefficients,
        rank,
        singular_values: svd.singular_values.clone(),
        normalized_covariance,
    })
}

fn condition_number(singular_values: &DVector<f64>, tol: f64) -> f64 {
    let kept: Vec<f64> = singular_values.iter().copied().filter(|&s| s > tol).collect();
    match (kept.first(), kept.last()) {
        (Some(max), Some(min)) => max / min,
        _ => f64::INFINITY,
    }
}
