//! Design matrices with named columns.

use crate::error::{LinearLabError, Result};
use nalgebra::DMatrix;

/// Name given to the column appended by [`DesignMatrix::add_constant`].
pub const CONSTANT_NAME: &str = "const";

/// A regression design: one row per sample, one named column per regressor.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignMatrix {
    names: Vec<String>,
    data: DMatrix<f64>,
}

impl DesignMatrix {
    /// Wraps `data`, naming its columns in order.
    ///
    /// # Errors
    /// [`LinearLabError::ShapeMismatch`] when the name count differs from the
    /// column count, [`LinearLabError::InvalidParameter`] for an empty or
    /// repeated name.
    pub fn new(names: Vec<String>, data: DMatrix<f64>) -> Result<Self> {
        if names.len() != data.ncols() {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} column names", data.ncols()),
                got: format!("{} column names", names.len()),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(LinearLabError::InvalidParameter(format!(
                    "column {} has an empty name",
                    i
                )));
            }
            if names[..i].contains(name) {
                return Err(LinearLabError::InvalidParameter(format!(
                    "duplicate column name `{}`",
                    name
                )));
            }
        }
        Ok(Self { names, data })
    }

    /// Builds a single-column design.
    pub fn from_column(name: &str, values: &[f64]) -> Result<Self> {
        let data = DMatrix::from_column_slice(values.len(), 1, values);
        Self::new(vec![name.to_string()], data)
    }

    /// Appends a named column.
    pub fn with_column(self, name: &str, values: &[f64]) -> Result<Self> {
        if values.len() != self.nrows() {
            return Err(LinearLabError::ShapeMismatch {
                expected: format!("{} rows", self.nrows()),
                got: format!("{} rows", values.len()),
            });
        }
        let cols = self.ncols();
        let mut data = self.data.insert_column(cols, 0.0);
        data.column_mut(cols).copy_from_slice(values);
        let mut names = self.names;
        names.push(name.to_string());
        Self::new(names, data)
    }

    /// Appends a column of ones named `const`.
    ///
    /// Fails if a column called `const` exists already.
    pub fn add_constant(self) -> Result<Self> {
        let ones = vec![1.0; self.nrows()];
        self.with_column(CONSTANT_NAME, &ones)
    }

    /// Returns a copy without the named column.
    pub fn drop_column(&self, name: &str) -> Result<Self> {
        let idx = self.column_index(name).ok_or_else(|| {
            LinearLabError::InvalidParameter(format!("no column named `{}`", name))
        })?;
        let mut names = self.names.clone();
        names.remove(idx);
        Self::new(names, self.data.clone().remove_column(idx))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Number of columns that hold one nonzero value in every row.
    pub fn constant_columns(&self) -> usize {
        if self.nrows() == 0 {
            return 0;
        }
        self.data
            .column_iter()
            .filter(|c| c[0] != 0.0 && c.iter().all(|&v| v == c[0]))
            .count()
    }
}
