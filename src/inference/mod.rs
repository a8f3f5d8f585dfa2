//! Ordinary least squares with named coefficients and hypothesis tests.
//!
//! - [`DesignMatrix`]: regressors with column names, `add_constant`.
//! - [`Ols`]: estimator producing [`OlsResults`].
//! - [`Restriction`]: text form of a linear hypothesis, e.g. `z = 0`.

pub mod design;
pub mod ols;
pub mod restriction;

pub use design::{DesignMatrix, CONSTANT_NAME};
pub use ols::{FTestResult, Ols, OlsResults, ResidualDiagnostics, Summary};
pub use restriction::Restriction;
