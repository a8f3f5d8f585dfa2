//! The two modeling lessons built on the library pieces.

pub mod overfitting;
pub mod spurious;

pub use overfitting::{
    DegreeResult, DegreeSummary, OverfittingExperiment, PolynomialModel, PolynomialModelParams,
    Regime, SweepReport,
};
pub use spurious::{HypothesisBlock, SpuriousReport, SpuriousRegressorExperiment, NUISANCE_NAME};
