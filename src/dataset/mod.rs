//! Observations of a single-feature linear relationship.
//!
//! A [`Dataset`] is an ordered sequence of `(x, y)` [`Observation`]s. Order is
//! significant: the overfitting lesson splits by position, never by shuffling.
//!
//! # Example
//!
//! ```rust
//! use linear_lab::dataset::{Dataset, Observation};
//!
//! let data: Dataset = (0..5).map(|i| Observation::new(i as f64, 2.0 * i as f64)).collect();
//! let (train, test) = data.split_at(3);
//! assert_eq!(train.len(), 3);
//! assert_eq!(test.xs(), vec![3.0, 4.0]);
//! ```

use crate::error::{LinearLabError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

pub mod generator;
pub mod io;

pub use generator::{binary_column, seeded_rng, NoisyLineGenerator};
pub use io::{read_csv, write_csv};

/// One sample point. Field order defines the CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

impl Observation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered collection of observations with columns `{x, y}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Builds a dataset from parallel `x` and `y` columns.
    ///
    /// # Errors
    /// [`LinearLabError::ShapeMismatch`] if the columns differ in length.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} y values", xs.len()),
                got: format!("{} y values", ys.len()),
            });
        }
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Observation::new(x, y))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn xs(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.y).collect()
    }

    /// Splits into the first `n` rows and the remainder, preserving order.
    ///
    /// If `n` exceeds the number of rows the prefix holds everything and the
    /// suffix is empty.
    pub fn split_at(&self, n: usize) -> (Dataset, Dataset) {
        let n = n.min(self.len());
        let (head, tail) = self.observations.split_at(n);
        (Dataset::new(head.to_vec()), Dataset::new(tail.to_vec()))
    }

    /// Single-feature design matrix of shape `(n, 1)`.
    pub fn feature_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_iterator(self.len(), 1, self.observations.iter().map(|o| o.x))
    }

    /// Target vector of shape `(n,)`.
    pub fn targets(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.observations.iter().map(|o| o.y))
    }

    /// Design matrix and target vector in one call.
    pub fn to_columns(&self) -> (DMatrix<f64>, DVector<f64>) {
        (self.feature_matrix(), self.targets())
    }

    /// Smallest and largest `x`, or `None` for an empty dataset.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range_of(self.observations.iter().map(|o| o.x))
    }

    /// Smallest and largest `y`, or `None` for an empty dataset.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range_of(self.observations.iter().map(|o| o.y))
    }
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
