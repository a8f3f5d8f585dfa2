//! # linear-lab
//!
//! Three small lessons about linear models, sharing one library:
//!
//! - **generate_data**: a seeded `y = x + ε` dataset written to CSV.
//! - **linear_ci**: an OLS fit with a meaningless regressor `z`, and the F
//!   tests that reveal it.
//! - **linear_overfitting**: polynomial fits of rising degree, scored on the
//!   data they were fitted on and on held-out rows.
//!
//! ## Example
//!
//! ```rust
//! use linear_lab::dataset::NoisyLineGenerator;
//! use linear_lab::experiment::OverfittingExperiment;
//!
//! let data = NoisyLineGenerator::lesson_dataset().unwrap();
//! let report = OverfittingExperiment::new().run(&data).unwrap();
//! assert_eq!(report.entries.len(), 4);
//! assert_eq!(report.train_rows, 15);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod experiment;
pub mod inference;
pub mod metrics;
pub mod model;
pub mod plot;
pub mod preprocessing;
pub mod serialization;

pub use error::{LinearLabError, Result};
