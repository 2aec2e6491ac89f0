use anyhow::Context;

use crate::{
    command::DatasetArg,
    util,
    view::{DEFAULT_BINS, Distribution},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlotArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
    /// Number of equal-width bins for numeric columns
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let column = randaudit_analysis::resolve_column(&arg.dataset.column)?;
    if arg.bins == 0 {
        anyhow::bail!("Number of bins must be positive");
    }
    let table = util::load_dataset(&arg.dataset.dataset)?;
    Distribution::from_table(&table, column, arg.bins)
        .print()
        .context("Failed to write histogram to stdout")?;
    Ok(())
}
