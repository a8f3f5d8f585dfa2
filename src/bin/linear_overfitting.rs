//! Polynomial fits of degree 1, 4, 7 and 10: in-sample fit versus held-out error.

use anyhow::{Context, Result};
use clap::Parser;
use linear_lab::config;
use linear_lab::dataset::read_csv;
use linear_lab::experiment::{OverfittingExperiment, Regime};
use linear_lab::plot::{plot_sweep, GENERALIZATION_FIGURE, IN_SAMPLE_FIGURE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linear_overfitting")]
#[command(about = "Compare polynomial degrees on training and held-out rows", long_about = None)]
struct Cli {
    /// CSV file produced by generate_data
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Directory for the two figure grids (defaults to the CSV's directory)
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Skip rendering the figure grids
    #[arg(long = "no-plot")]
    no_plot: bool,

    /// Write the per-degree evaluations and coefficients as JSON
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let data_path = cli.data.unwrap_or_else(config::default_data_path);
    let data =
        read_csv(&data_path).with_context(|| format!("reading {}", data_path.display()))?;

    let sweep = OverfittingExperiment::new()
        .run(&data)
        .context("running the degree sweep")?;

    println!(
        "{} training rows, {} test rows",
        sweep.train_rows, sweep.test_rows
    );
    println!(
        "{:>6} {:>14} {:>10} {:>14} {:>10}",
        "degree", "test mse", "test R2", "full mse", "full R2"
    );
    for entry in &sweep.entries {
        println!(
            "{:>6} {:>14.3} {:>10.3} {:>14.3} {:>10.3}",
            entry.degree,
            entry.generalization.mse,
            entry.generalization.r_squared,
            entry.in_sample.mse,
            entry.in_sample.r_squared
        );
    }

    if let Some(path) = &cli.report {
        sweep
            .write_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if !cli.no_plot {
        let out_dir = cli
            .out_dir
            .unwrap_or_else(|| config::figure_dir_for(&data_path));
        for (regime, name) in [
            (Regime::InSample, IN_SAMPLE_FIGURE),
            (Regime::Generalization, GENERALIZATION_FIGURE),
        ] {
            let figure = out_dir.join(name);
            plot_sweep(&data, &sweep, regime, &figure)
                .with_context(|| format!("rendering {}", figure.display()))?;
        }
    }
    Ok(())
}
