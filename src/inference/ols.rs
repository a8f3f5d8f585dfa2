//! Ordinary least squares with classical inference.
//!
//! [`Ols::fit`] estimates the coefficients of a named design and derives the
//! statistics of the usual regression table: standard errors, t and F tests,
//! goodness of fit and information criteria. The errors are assumed i.i.d.
//! normal with unknown variance.

use super::design::DesignMatrix;
use super::restriction::Restriction;
use crate::error::{LinearLabError, Result};
use crate::model::solver::lstsq;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};
use std::f64::consts::PI;
use std::fmt;

/// Entry point of the OLS estimator.
pub struct Ols;

impl Ols {
    /// Fits `y` on every column of `design`.
    ///
    /// The design is used as given; add a `const` column with
    /// [`DesignMatrix::add_constant`] to estimate an intercept.
    ///
    /// # Errors
    /// - [`LinearLabError::ShapeMismatch`] if `y` has a different row count
    /// - [`LinearLabError::InvalidParameter`] if the design leaves no residual
    ///   degrees of freedom
    /// - solver errors for empty or non-finite input
    pub fn fit(design: &DesignMatrix, y: &DVector<f64>) -> Result<OlsResults> {
        let x = design.matrix();
        if y.len() != design.nrows() {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} observations", design.nrows()),
                got: format!("{} observations", y.len()),
            });
        }

        let sol = lstsq(x, y)?;
        let nobs = design.nrows();
        if sol.rank >= nobs {
            return Err(LinearLabError::InvalidParameter(format!(
                "{} observations leave no residual degrees of freedom for rank {}",
                nobs, sol.rank
            )));
        }

        let k_constant = design.constant_columns().min(1);
        let df_model = (sol.rank - k_constant) as f64;
        let df_resid = (nobs - sol.rank) as f64;

        let fitted = x * &sol.coefficients;
        let resid = y - &fitted;
        let ssr = resid.norm_squared();
        let scale = ssr / df_resid;

        let tss = if k_constant > 0 {
            let mean = y.mean();
            y.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        } else {
            y.norm_squared()
        };
        let rsquared = 1.0 - ssr / tss;
        let rsquared_adj = 1.0 - (nobs - k_constant) as f64 / df_resid * (1.0 - rsquared);

        let cov_params = &sol.normalized_covariance * scale;
        let params: Vec<f64> = sol.coefficients.iter().copied().collect();
        let bse: Vec<f64> = cov_params.diagonal().iter().map(|v| v.sqrt()).collect();
        let tvalues: Vec<f64> = params.iter().zip(&bse).map(|(b, s)| b / s).collect();

        let t_dist = students_t(df_resid)?;
        let pvalues: Vec<f64> = tvalues.iter().map(|t| 2.0 * t_dist.sf(t.abs())).collect();

        let (fvalue, f_pvalue) = if df_model > 0.0 {
            let fvalue = ((tss - ssr) / df_model) / scale;
            let dist = fisher(df_model, df_resid)?;
            (fvalue, dist.sf(fvalue))
        } else {
            (f64::NAN, f64::NAN)
        };

        let n = nobs as f64;
        let llf = -n / 2.0 * ((2.0 * PI).ln() + (ssr / n).ln() + 1.0);
        let k_params = df_model + k_constant as f64;
        let aic = -2.0 * llf + 2.0 * k_params;
        let bic = -2.0 * llf + n.ln() * k_params;

        let singular = x.singular_values();
        let cond_no = singular.max() / singular.min();

        log::debug!(
            "ols: {} observations, {} columns, rank {}, R2 {:.4}",
            nobs,
            design.ncols(),
            sol.rank,
            rsquared
        );

        Ok(OlsResults {
            names: design.names().to_vec(),
            params,
            bse,
            tvalues,
            pvalues,
            rsquared,
            rsquared_adj,
            fvalue,
            f_pvalue,
            llf,
            aic,
            bic,
            nobs,
            df_model,
            df_resid,
            ssr,
            scale,
            cond_no,
            diagnostics: ResidualDiagnostics::from_residuals(resid.as_slice())?,
            cov_params,
        })
    }
}

fn students_t(df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df).map_err(|e| LinearLabError::Numerical(e.to_string()))
}

fn fisher(df_num: f64, df_denom: f64) -> Result<FisherSnedecor> {
    FisherSnedecor::new(df_num, df_denom).map_err(|e| LinearLabError::Numerical(e.to_string()))
}

/// Shape statistics of the residuals shown under the coefficient table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    pub durbin_watson: f64,
    pub skew: f64,
    pub kurtosis: f64,
    pub jarque_bera: f64,
    pub jarque_bera_pvalue: f64,
}

impl ResidualDiagnostics {
    fn from_residuals(resid: &[f64]) -> Result<Self> {
        let n = resid.len() as f64;
        let mean = resid.iter().sum::<f64>() / n;
        let moment = |p: i32| resid.iter().map(|r| (r - mean).powi(p)).sum::<f64>() / n;
        let m2 = moment(2);
        let skew = moment(3) / m2.powf(1.5);
        let kurtosis = moment(4) / (m2 * m2);

        let diff_sq: f64 = resid.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
        let durbin_watson = diff_sq / resid.iter().map(|r| r * r).sum::<f64>();

        let jarque_bera = n / 6.0 * (skew * skew + (kurtosis - 3.0).powi(2) / 4.0);
        let jarque_bera_pvalue = if jarque_bera.is_finite() {
            ChiSquared::new(2.0)
                .map_err(|e| LinearLabError::Numerical(e.to_string()))?
                .sf(jarque_bera)
        } else {
            f64::NAN
        };

        Ok(Self {
            durbin_watson,
            skew,
            kurtosis,
            jarque_bera,
            jarque_bera_pvalue,
        })
    }
}

/// Everything [`Ols::fit`] estimates.
#[derive(Clone, Debug)]
pub struct OlsResults {
    pub names: Vec<String>,
    pub params: Vec<f64>,
    pub bse: Vec<f64>,
    pub tvalues: Vec<f64>,
    /// Two-sided Student-t p-values with `df_resid` degrees of freedom.
    pub pvalues: Vec<f64>,
    pub rsquared: f64,
    pub rsquared_adj: f64,
    /// Overall regression F statistic; the constant is not tested.
    pub fvalue: f64,
    pub f_pvalue: f64,
    /// Gaussian log-likelihood at the estimate.
    pub llf: f64,
    pub aic: f64,
    pub bic: f64,
    pub nobs: usize,
    pub df_model: f64,
    pub df_resid: f64,
    pub ssr: f64,
    /// Residual variance `ssr / df_resid`.
    pub scale: f64,
    /// Condition number of the raw design.
    pub cond_no: f64,
    pub diagnostics: ResidualDiagnostics,
    cov_params: DMatrix<f64>,
}

impl OlsResults {
    /// Estimated coefficient for the column called `name`.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.params[i])
    }

    /// Covariance matrix of the estimates, `scale · (XᵀX)⁻¹`.
    pub fn cov_params(&self) -> &DMatrix<f64> {
        &self.cov_params
    }

    /// Two-sided `1 - alpha` confidence interval per coefficient.
    pub fn conf_int(&self, alpha: f64) -> Result<Vec<(f64, f64)>> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(LinearLabError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                alpha
            )));
        }
        let q = students_t(self.df_resid)?.inverse_cdf(1.0 - alpha / 2.0);
        Ok(self
            .params
            .iter()
            .zip(&self.bse)
            .map(|(b, s)| (b - q * s, b + q * s))
            .collect())
    }

    /// Joint F test of `R β = q`, one row per restriction.
    ///
    /// # Errors
    /// - [`LinearLabError::InvalidParameter`] for an empty restriction list
    /// - [`LinearLabError::InvalidRestriction`] for an unknown coefficient
    /// - [`LinearLabError::Numerical`] if the restrictions are linearly
    ///   dependent
    pub fn f_test(&self, restrictions: &[Restriction]) -> Result<FTestResult> {
        if restrictions.is_empty() {
            return Err(LinearLabError::InvalidParameter(
                "an F test needs at least one restriction".to_string(),
            ));
        }

        let j = restrictions.len();
        let k = self.params.len();
        let mut r = DMatrix::<f64>::zeros(j, k);
        let mut q = DVector::<f64>::zeros(j);
        for (i, restriction) in restrictions.iter().enumerate() {
            r.set_row(i, &restriction.row(&self.names)?.transpose());
            q[i] = restriction.rhs();
        }

        let beta = DVector::from_column_slice(&self.params);
        let diff = &r * beta - q;
        let middle = &r * &self.cov_params * r.transpose();
        let inv = middle.try_inverse().ok_or_else(|| {
            LinearLabError::Numerical("restrictions are linearly dependent".to_string())
        })?;

        let fvalue = (diff.transpose() * inv * &diff)[(0, 0)] / j as f64;
        let df_num = j as f64;
        let pvalue = fisher(df_num, self.df_resid)?.sf(fvalue);

        Ok(FTestResult {
            hypotheses: restrictions.iter().map(|r| r.to_string()).collect(),
            fvalue,
            pvalue,
            df_num,
            df_denom: self.df_resid,
        })
    }

    /// Parses each text with [`Restriction::from_str`](std::str::FromStr)
    /// and runs [`f_test`](Self::f_test).
    pub fn f_test_str(&self, hypotheses: &[&str]) -> Result<FTestResult> {
        let parsed = hypotheses
            .iter()
            .map(|h| h.parse())
            .collect::<Result<Vec<Restriction>>>()?;
        self.f_test(&parsed)
    }

    /// Regression table for printing.
    pub fn summary(&self) -> Summary<'_> {
        Summary { results: self }
    }
}

/// Outcome of [`OlsResults::f_test`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FTestResult {
    /// Normalised text of each restriction.
    pub hypotheses: Vec<String>,
    pub fvalue: f64,
    pub pvalue: f64,
    pub df_num: f64,
    pub df_denom: f64,
}

impl fmt::Display for FTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<F test: F={:.6}, p={:.6}, df_denom={}, df_num={}>",
            self.fvalue, self.pvalue, self.df_denom, self.df_num
        )
    }
}

/// Printable regression table. See [`OlsResults::summary`].
pub struct Summary<'a> {
    results: &'a OlsResults,
}

const RULE_WIDTH: usize = 78;

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.results;
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{:^width$}", "OLS Regression Results", width = RULE_WIDTH)?;
        writeln!(f, "{}", heavy)?;
        let left_right = [
            ("Model:", "OLS".to_string(), "R-squared:", format!("{:.3}", r.rsquared)),
            (
                "Method:",
                "Least Squares".to_string(),
                "Adj. R-squared:",
                format!("{:.3}", r.rsquared_adj),
            ),
            (
                "No. Observations:",
                r.nobs.to_string(),
                "F-statistic:",
                format!("{:.2}", r.fvalue),
            ),
            (
                "Df Residuals:",
                format!("{}", r.df_resid),
                "Prob (F-statistic):",
                format!("{:.3e}", r.f_pvalue),
            ),
            (
                "Df Model:",
                format!("{}", r.df_model),
                "Log-Likelihood:",
                format!("{:.3}", r.llf),
            ),
            ("AIC:", format!("{:.2}", r.aic), "BIC:", format!("{:.2}", r.bic)),
        ];
        for (lk, lv, rk, rv) in &left_right {
            writeln!(f, "{:<20}{:>18}   {:<20}{:>17}", lk, lv, rk, rv)?;
        }
        writeln!(f, "{}", heavy)?;

        writeln!(
            f,
            "{:<10}{:>10}{:>10}{:>10}{:>10}{:>14}{:>14}",
            "", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
        )?;
        writeln!(f, "{}", light)?;
        let intervals = r.conf_int(0.05).map_err(|_| fmt::Error)?;
        for (i, name) in r.names.iter().enumerate() {
            let (lo, hi) = intervals[i];
            writeln!(
                f,
                "{:<10}{:>10.4}{:>10.3}{:>10.3}{:>10.3}{:>14.3}{:>14.3}",
                name, r.params[i], r.bse[i], r.tvalues[i], r.pvalues[i], lo, hi
            )?;
        }
        writeln!(f, "{}", heavy)?;

        let d = &r.diagnostics;
        writeln!(
            f,
            "{:<20}{:>18.3}   {:<20}{:>17.3}",
            "Durbin-Watson:", d.durbin_watson, "Jarque-Bera (JB):", d.jarque_bera
        )?;
        writeln!(
            f,
            "{:<20}{:>18.3}   {:<20}{:>17.3}",
            "Skew:", d.skew, "Prob(JB):", d.jarque_bera_pvalue
        )?;
        writeln!(
            f,
            "{:<20}{:>18.3}   {:<20}{:>17.3e}",
            "Kurtosis:", d.kurtosis, "Cond. No.:", r.cond_no
        )?;
        write!(f, "{}", heavy)
    }
}
