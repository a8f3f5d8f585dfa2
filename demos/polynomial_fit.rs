// Fit a cubic through the lesson data and save the fitted pipeline.
use linear_lab::{
    dataset::NoisyLineGenerator,
    experiment::PolynomialModel,
    model::InferenceModel,
    preprocessing::{FittedTransformer, PolynomialFeatures, Transformer},
};

fn main() -> linear_lab::Result<()> {
    let data = NoisyLineGenerator::lesson_dataset()?;
    let (x, y) = data.to_columns();

    let features = PolynomialFeatures::new().with_degree(3).fit(&x)?;
    println!("features: {:?}", features.feature_names(&["x"]));

    let model = PolynomialModel::fit(3, &x, &y)?;
    println!("coefficients: {:?}", model.coefficients());
    println!("{}", model.evaluate(&data)?);

    let path = std::env::temp_dir().join("polynomial_fit.bin");
    model.save_to_file(&path)?;
    let restored = PolynomialModel::load_from_file(&path)?;
    println!("prediction at x = 30: {:.3}", restored.predict(&[30.0])?);
    Ok(())
}
