/// A marker type indicating that a model has **not been fitted** yet.
///
/// A `LinearModel<Unfitted>` carries only its configuration. Calling `fit`
/// consumes nothing and returns a separate `LinearModel<Fitted>`, so an
/// unfitted model can never be asked for a prediction.
#[derive(Clone, Copy, Debug)]
pub struct Unfitted;

/// A marker type indicating that a model holds **estimated coefficients**.
///
/// A `Fitted` model contains only what prediction needs: coefficients, the
/// intercept and the configuration that produced them.
#[derive(Clone, Copy, Debug)]
pub struct Fitted;
