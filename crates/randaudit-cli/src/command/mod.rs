use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    chi_square::ChiSquareArg, cluster::ClusterArg, generate::GenerateArg, metrics::MetricsArg,
    plot::PlotArg, report::ReportArg,
};

mod chi_square;
mod cluster;
mod generate;
mod metrics;
mod plot;
mod report;

/// Log level used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Synthesize a biased guess dataset and save it
    Generate(#[clap(flatten)] GenerateArg),
    /// Print randomness metrics of a column as JSON
    Metrics(#[clap(flatten)] MetricsArg),
    /// Test a column against an expected distribution
    ChiSquare(#[clap(flatten)] ChiSquareArg),
    /// Draw a histogram of a column
    Plot(#[clap(flatten)] PlotArg),
    /// Cluster a numeric column and write the labelled table
    Cluster(#[clap(flatten)] ClusterArg),
    /// Print a text report of a column
    Report(#[clap(flatten)] ReportArg),
}

/// Dataset and column selection shared by the analysis subcommands.
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the dataset file
    pub dataset: PathBuf,
    /// Column to analyze (response, category or timestamp)
    #[arg(long, default_value = "response")]
    pub column: String,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Metrics(arg) => metrics::run(&arg)?,
        Mode::ChiSquare(arg) => chi_square::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
        Mode::Cluster(arg) => cluster::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
