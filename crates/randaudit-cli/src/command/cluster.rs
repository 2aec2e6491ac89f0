use std::path::PathBuf;

use anyhow::Context;
use randaudit_analysis::clustering::{self, DEFAULT_CLUSTERS};

use crate::{command::DatasetArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
    /// Number of clusters
    #[arg(long, default_value_t = DEFAULT_CLUSTERS)]
    clusters: usize,
    /// Output dataset path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ClusterArg) -> anyhow::Result<()> {
    let table = util::load_dataset(&arg.dataset.dataset)?;
    let clustering = clustering::perform_clustering(&table, &arg.dataset.column, arg.clusters)?;
    for (label, (centroid, size)) in clustering
        .centroids
        .iter()
        .zip(&clustering.cluster_sizes)
        .enumerate()
    {
        tracing::info!(label, centroid, size, "cluster");
    }

    let mut output = util::Output::from_output_path(arg.output.clone())?;
    table
        .write_csv_with_column(&mut output, "cluster", &clustering.labels)
        .with_context(|| format!("Failed to write clustered dataset to {}", output.display_path()))?;
    Ok(())
}
