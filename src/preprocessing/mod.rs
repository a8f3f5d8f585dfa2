//! Feature transformers.
//!
//! Transformers follow the same fitted/unfitted split as the models: an
//! unfitted [`Transformer`] holds hyperparameters, [`Transformer::fit`] turns it
//! into a [`FittedTransformer`] that can transform new data and be persisted.

pub mod polynomial;
pub mod traits;

pub use polynomial::{FittedPolynomialFeatures, PolynomialFeatures, PolynomialFeaturesParams};
pub use traits::{FittedTransformer, Transformer};
