//! Generates the seeded `y = x + ε` dataset and plots it.

use anyhow::{Context, Result};
use clap::Parser;
use linear_lab::config::{self, GENERATOR_SEED};
use linear_lab::dataset::{write_csv, NoisyLineGenerator};
use linear_lab::plot::{plot_dataset, DATASET_FIGURE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_data")]
#[command(about = "Write twenty noisy points of y = x + ε to CSV", long_about = None)]
struct Cli {
    /// CSV file to write (overwritten if present)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Directory for the scatter plot (defaults to the CSV's directory)
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Skip rendering the scatter plot
    #[arg(long = "no-plot")]
    no_plot: bool,

    /// Seed of the noise source
    #[arg(long, default_value_t = GENERATOR_SEED)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let data_path = cli.data.unwrap_or_else(config::default_data_path);
    let data = NoisyLineGenerator::new()
        .generate_seeded(cli.seed)
        .context("generating dataset")?;

    write_csv(&data, &data_path)
        .with_context(|| format!("writing {}", data_path.display()))?;

    println!("{:>6} {:>8}", "x", "y");
    for obs in data.observations() {
        println!("{:>6} {:>8.2}", obs.x, obs.y);
    }

    if !cli.no_plot {
        let out_dir = cli
            .out_dir
            .unwrap_or_else(|| config::figure_dir_for(&data_path));
        let figure = out_dir.join(DATASET_FIGURE);
        plot_dataset(&data, &figure)
            .with_context(|| format!("rendering {}", figure.display()))?;
    }
    Ok(())
}
