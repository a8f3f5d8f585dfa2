//! The fit/transform contract shared by feature transformers.
//!
//! - [`Transformer`]: hyperparameters only; `fit` inspects the data.
//! - [`FittedTransformer`]: the learned layout; transforms and persists.

use crate::error::Result;
use crate::serialization::{load_params, save_params, SerializableParams};
use std::path::Path;

/// A transformer that still has to see data.
///
/// ```rust
/// use linear_lab::preprocessing::{FittedTransformer, PolynomialFeatures, Transformer};
/// use nalgebra::DMatrix;
///
/// let x = DMatrix::from_row_slice(2, 1, &[2.0, 3.0]);
/// let fitted = PolynomialFeatures::new().with_degree(2).fit(&x).unwrap();
/// let expanded = fitted.transform(&x).unwrap();
/// assert_eq!(expanded.row(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0, 9.0]);
/// ```
pub trait Transformer: Clone {
    type Input;
    type Output;
    /// What the fitted form persists.
    type Params: SerializableParams;
    type Fitted: FittedTransformer<Params = Self::Params, Input = Self::Input, Output = Self::Output>;

    /// Learns the column layout from `data`.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted>;

    /// `fit` followed by `transform` on the same data.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output> {
        self.fit(data)?.transform(data)
    }
}

/// A transformer with learned state.
///
/// `from_params(extract_params())` rebuilds an identical transformer.
pub trait FittedTransformer: Clone {
    type Input;
    type Output;
    type Params: SerializableParams;

    /// Applies the learned expansion to `data`.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output>;

    fn extract_params(&self) -> Self::Params;

    /// Rebuilds from persisted parameters, validating them first.
    fn from_params(params: Self::Params) -> Result<Self>
    where
        Self: Sized;

    /// Width of the input seen by `fit`.
    fn n_features_in(&self) -> usize;

    /// Writes the parameters to `path`.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_params(&self.extract_params(), path)
    }

    /// Reads parameters written by [`save_to_file`](Self::save_to_file).
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        Self::from_params(load_params(path)?)
    }
}
