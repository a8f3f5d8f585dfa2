//! Polynomial feature generation.
//!
//! Expands each sample into all monomials of its features up to a chosen
//! degree. For a single feature `x` and degree `d` the output row is
//! `[1, x, x^2, ..., x^d]` (the leading `1` only when the bias column is on).

use crate::error::{LinearLabError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// PolynomialFeatures transformer.
///
/// For a two dimensional sample `[a, b]` the degree-2 features are
/// `[1, a, b, a^2, ab, b^2]`: monomials grouped by degree, and within one
/// degree ordered lexicographically by feature index.
///
/// Whether the output carries a constant column is controlled by
/// [`with_include_bias`](Self::with_include_bias). A linear model fitted on
/// these features should then be configured without its own intercept.
#[derive(Clone, Debug)]
pub struct PolynomialFeatures {
    /// Maximum degree of polynomial features.
    degree: usize,
    /// If true, include a bias column (feature of all 1s).
    include_bias: bool,
}

impl Default for PolynomialFeatures {
    fn default() -> Self {
        Self::new()
    }
}

impl PolynomialFeatures {
    /// Create a new PolynomialFeatures with default settings (degree=2, bias on).
    pub fn new() -> Self {
        Self {
            degree: 2,
            include_bias: true,
        }
    }

    /// Set the maximum degree of polynomial features.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set whether to include a bias column (all 1s).
    pub fn with_include_bias(mut self, include_bias: bool) -> Self {
        self.include_bias = include_bias;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn include_bias(&self) -> bool {
        self.include_bias
    }
}

/// Serializable parameters for fitted PolynomialFeatures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFeaturesParams {
    pub degree: usize,
    pub include_bias: bool,
    pub n_features_in: usize,
    /// Feature indices multiplied together for each output column.
    /// `[]` is the bias, `[0]` the first feature, `[0, 0]` its square.
    pub powers: Vec<Vec<usize>>,
}

/// Fitted PolynomialFeatures ready for inference.
#[derive(Clone, Debug)]
pub struct FittedPolynomialFeatures {
    degree: usize,
    include_bias: bool,
    n_features_in: usize,
    powers: Vec<Vec<usize>>,
}

impl FittedPolynomialFeatures {
    pub fn n_features_out(&self) -> usize {
        self.powers.len()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn include_bias(&self) -> bool {
        self.include_bias
    }

    /// Output column names given the input feature names, e.g. `1`, `x`, `x^2`.
    pub fn feature_names(&self, input_names: &[&str]) -> Vec<String> {
        self.powers
            .iter()
            .map(|indices| monomial_name(indices, input_names))
            .collect()
    }

    /// Expands a single sample.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features_in {
            return Err(feature_mismatch(self.n_features_in, row.len()));
        }
        Ok(self
            .powers
            .iter()
            .map(|indices| indices.iter().map(|&i| row[i]).product::<f64>())
            .collect())
    }
}

impl Transformer for PolynomialFeatures {
    type Input = DMatrix<f64>;
    type Output = DMatrix<f64>;
    type Params = PolynomialFeaturesParams;
    type Fitted = FittedPolynomialFeatures;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted> {
        let (rows, cols) = data.shape();

        if rows == 0 {
            return Err(LinearLabError::EmptyData(
                "Cannot fit PolynomialFeatures on empty data".to_string(),
            ));
        }
        if cols == 0 {
            return Err(LinearLabError::InvalidParameter(
                "Cannot fit PolynomialFeatures on data with no features".to_string(),
            ));
        }
        if self.degree == 0 && !self.include_bias {
            return Err(LinearLabError::InvalidParameter(
                "degree 0 without a bias column produces no features".to_string(),
            ));
        }

        let powers = monomial_indices(cols, self.degree, self.include_bias);
        log::debug!(
            "polynomial features: {} inputs, degree {}, {} outputs",
            cols,
            self.degree,
            powers.len()
        );

        Ok(FittedPolynomialFeatures {
            degree: self.degree,
            include_bias: self.include_bias,
            n_features_in: cols,
            powers,
        })
    }
}

impl FittedTransformer for FittedPolynomialFeatures {
    type Input = DMatrix<f64>;
    type Output = DMatrix<f64>;
    type Params = PolynomialFeaturesParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output> {
        let (rows, cols) = data.shape();
        if cols != self.n_features_in {
            return Err(feature_mismatch(self.n_features_in, cols));
        }

        Ok(DMatrix::from_fn(rows, self.n_features_out(), |r, c| {
            self.powers[c].iter().map(|&i| data[(r, i)]).product()
        }))
    }

    fn extract_params(&self) -> Self::Params {
        PolynomialFeaturesParams {
            degree: self.degree,
            include_bias: self.include_bias,
            n_features_in: self.n_features_in,
            powers: self.powers.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self> {
        if let Some(bad) = params
            .powers
            .iter()
            .flatten()
            .find(|&&i| i >= params.n_features_in)
        {
            return Err(LinearLabError::InvalidParameter(format!(
                "feature index {} out of range for {} inputs",
                bad, params.n_features_in
            )));
        }
        Ok(FittedPolynomialFeatures {
            degree: params.degree,
            include_bias: params.include_bias,
            n_features_in: params.n_features_in,
            powers: params.powers,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }
}

fn feature_mismatch(expected: usize, got: usize) -> LinearLabError {
    LinearLabError::ShapeMismatch {
        expected: format!("{} features", expected),
        got: format!("{} features", got),
    }
}

/// All non-decreasing index sequences of length `1..=degree`, grouped by length.
fn monomial_indices(n_features: usize, degree: usize, include_bias: bool) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if include_bias {
        out.push(Vec::new());
    }

    // Each degree extends the previous degree's sequences by one index that is
    // not smaller than the last one.
    let mut frontier: Vec<Vec<usize>> = vec![Vec::new()];
    for _ in 0..degree {
        frontier = frontier
            .iter()
            .flat_map(|seq| {
                let start = seq.last().copied().unwrap_or(0);
                (start..n_features).map(move |i| {
                    let mut next = seq.clone();
                    next.push(i);
                    next
                })
            })
            .collect();
        out.extend(frontier.iter().cloned());
    }
    out
}

fn monomial_name(indices: &[usize], input_names: &[&str]) -> String {
    if indices.is_empty() {
        return "1".to_string();
    }
    let mut parts: Vec<String> = Vec::new();
    let mut iter = indices.iter().peekable();
    while let Some(&i) = iter.next() {
        let mut power = 1;
        while iter.peek() == Some(&&i) {
            iter.next();
            power += 1;
        }
        let name = input_names
            .get(i)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("x{}", i));
        if power == 1 {
            parts.push(name);
        } else {
            parts.push(format!("{}^{}", name, power));
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(m: &DMatrix<f64>, r: usize) -> Vec<f64> {
        m.row(r).iter().copied().collect()
    }

    #[test]
    fn test_polynomial_features_single_feature() {
        let data = DMatrix::from_row_slice(2, 1, &[2.0, 3.0]);
        let fitted = PolynomialFeatures::new().with_degree(3).fit(&data).unwrap();

        assert_eq!(fitted.n_features_in(), 1);
        assert_eq!(fitted.n_features_out(), 4);

        let t = fitted.transform(&data).unwrap();
        assert_eq!(row(&t, 0), vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(row(&t, 1), vec![1.0, 3.0, 9.0, 27.0]);
    }

    #[test]
    fn test_polynomial_features_two_features() {
        // [a, b] -> [1, a, b, a^2, ab, b^2]
        let data = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let t = PolynomialFeatures::new()
            .with_degree(2)
            .fit_transform(&data)
            .unwrap();
        assert_eq!(row(&t, 0), vec![1.0, 1.0, 2.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_polynomial_features_no_bias() {
        let data = DMatrix::from_row_slice(1, 1, &[5.0]);
        let t = PolynomialFeatures::new()
            .with_degree(2)
            .with_include_bias(false)
            .fit_transform(&data)
            .unwrap();
        assert_eq!(row(&t, 0), vec![5.0, 25.0]);
    }

    #[test]
    fn test_polynomial_features_degree_10_width() {
        let data = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        let fitted = PolynomialFeatures::new().with_degree(10).fit(&data).unwrap();
        assert_eq!(fitted.n_features_out(), 11);
        let t = fitted.transform(&data).unwrap();
        assert_eq!(t[(1, 10)], 1024.0);
    }

    #[test]
    fn test_degree_zero_with_bias_is_constant() {
        let data = DMatrix::from_row_slice(2, 1, &[7.0, 8.0]);
        let t = PolynomialFeatures::new()
            .with_degree(0)
            .fit_transform(&data)
            .unwrap();
        assert_eq!(t.shape(), (2, 1));
        assert!(t.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_degree_zero_without_bias_rejected() {
        let data = DMatrix::from_row_slice(1, 1, &[1.0]);
        let err = PolynomialFeatures::new()
            .with_degree(0)
            .with_include_bias(false)
            .fit(&data)
            .unwrap_err();
        assert!(matches!(err, LinearLabError::InvalidParameter(_)));
    }

    #[test]
    fn test_fit_empty_rejected() {
        let data = DMatrix::<f64>::zeros(0, 1);
        assert!(matches!(
            PolynomialFeatures::new().fit(&data),
            Err(LinearLabError::EmptyData(_))
        ));
    }

    #[test]
    fn test_transform_feature_mismatch() {
        let fitted = PolynomialFeatures::new()
            .fit(&DMatrix::from_row_slice(1, 1, &[1.0]))
            .unwrap();
        let err = fitted
            .transform(&DMatrix::from_row_slice(1, 2, &[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, LinearLabError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_transform_row_matches_matrix() {
        let fitted = PolynomialFeatures::new()
            .with_degree(4)
            .fit(&DMatrix::from_row_slice(1, 1, &[1.0]))
            .unwrap();
        assert_eq!(
            fitted.transform_row(&[2.0]).unwrap(),
            vec![1.0, 2.0, 4.0, 8.0, 16.0]
        );
    }

    #[test]
    fn test_feature_names() {
        let fitted = PolynomialFeatures::new()
            .with_degree(2)
            .fit(&DMatrix::from_row_slice(1, 2, &[1.0, 2.0]))
            .unwrap();
        assert_eq!(
            fitted.feature_names(&["x", "z"]),
            vec!["1", "x", "z", "x^2", "x z", "z^2"]
        );
    }

    #[test]
    fn test_polynomial_features_serialization() {
        let data = DMatrix::from_row_slice(2, 1, &[1.5, -2.0]);
        let fitted = PolynomialFeatures::new().with_degree(3).fit(&data).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("poly.bin");
        fitted.save_to_file(&path).unwrap();
        let loaded = FittedPolynomialFeatures::load_from_file(&path).unwrap();

        assert_eq!(loaded.extract_params(), fitted.extract_params());
        assert_eq!(
            loaded.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_from_params_rejects_bad_index() {
        let params = PolynomialFeaturesParams {
            degree: 1,
            include_bias: false,
            n_features_in: 1,
            powers: vec![vec![3]],
        };
        assert!(FittedPolynomialFeatures::from_params(params).is_err());
    }
}
