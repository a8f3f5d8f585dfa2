//! Error types shared by every stage of the lessons.

use thiserror::Error;

/// Error type for loading, fitting, testing and rendering.
#[derive(Debug, Error)]
pub enum LinearLabError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV reader or writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The file parsed as CSV but does not carry the expected columns.
    #[error("Malformed data: {0}")]
    MalformedData(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Shape mismatch between expected and actual dimensions.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },
    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Singular system or non-finite solution.
    #[error("Numerical error: {0}")]
    Numerical(String),
    /// A hypothesis string could not be turned into a linear restriction.
    #[error("Invalid restriction `{input}`: {reason}")]
    InvalidRestriction { input: String, reason: String },
    /// Rendering backend failure.
    #[error("Plot error: {0}")]
    Plot(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for LinearLabError {
    fn from(err: bincode::Error) -> Self {
        LinearLabError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for LinearLabError {
    fn from(err: serde_json::Error) -> Self {
        LinearLabError::Serialization(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LinearLabError>;
