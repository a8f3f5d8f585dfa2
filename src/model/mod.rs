//! Least-squares models with compile-time fit state.

pub mod linear;
pub mod solver;
pub mod state;

pub use linear::{LinearModel, LinearParams, LinearRegression, LinearRegressionConfig};
pub use solver::{lstsq, LstsqSolution};
pub use state::{Fitted, Unfitted};

use crate::error::Result;
use crate::serialization::SerializableParams;

/// Prediction and persistence for a fitted model.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;
    type ParamsRepr: SerializableParams;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle>;

    /// Predict on every row of a design matrix.
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch>;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Result<Self>
    where
        Self: Sized;

    /// Save the fitted parameters to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        crate::serialization::save_params(&self.extract_params(), path)
    }

    /// Load fitted parameters written by [`save_to_file`](Self::save_to_file).
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        Self::from_params(crate::serialization::load_params(path)?)
    }
}
