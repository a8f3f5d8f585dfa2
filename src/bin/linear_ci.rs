//! Fits OLS with a meaningless regressor and tests which coefficients hold up.

use anyhow::{Context, Result};
use clap::Parser;
use linear_lab::config::{self, NUISANCE_SEED};
use linear_lab::dataset::read_csv;
use linear_lab::experiment::SpuriousRegressorExperiment;
use linear_lab::inference::Restriction;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linear_ci")]
#[command(about = "Regression summary and F tests for y on x, a random z and a constant", long_about = None)]
struct Cli {
    /// CSV file produced by generate_data
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Seed of the random 0/1 regressor z
    #[arg(long, default_value_t = NUISANCE_SEED)]
    seed: u64,

    /// Additional joint hypothesis, e.g. "x = 1, const = 0" (repeatable)
    #[arg(long = "hypothesis", value_name = "EXPR")]
    hypotheses: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let data_path = cli.data.unwrap_or_else(config::default_data_path);
    let data =
        read_csv(&data_path).with_context(|| format!("reading {}", data_path.display()))?;

    let mut experiment = SpuriousRegressorExperiment::new().with_seed(cli.seed);
    for text in &cli.hypotheses {
        let restrictions = Restriction::parse_list(text)
            .with_context(|| format!("parsing hypothesis `{}`", text))?;
        let title = format!("Test the hypothesis {}:", text);
        experiment = experiment.with_hypothesis(&title, restrictions);
    }

    let report = experiment.run(&data).context("fitting the regression")?;

    println!("{}", report.full.summary());
    for block in &report.tests {
        println!();
        println!("{}", block.title);
        println!("{}", block.result);
    }

    println!();
    println!("Refit without z:");
    println!("{}", report.reduced.summary());
    Ok(())
}
