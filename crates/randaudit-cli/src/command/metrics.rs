use std::path::PathBuf;

use randaudit_analysis::metrics;

use crate::{command::DatasetArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MetricsArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
    /// Output JSON path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MetricsArg) -> anyhow::Result<()> {
    let table = util::load_dataset(&arg.dataset.dataset)?;
    let metrics = metrics::calculate_metrics(&table, &arg.dataset.column)?;
    util::Output::save_json(&metrics, arg.output.clone())?;
    Ok(())
}
