use std::io::{self, Write};

use anyhow::Context;
use randaudit_analysis::{
    AnalysisError,
    goodness_of_fit::{self, ExpectedDistribution},
    metrics, summary,
};
use randaudit_dataset::Table;

use crate::{
    command::DatasetArg,
    util,
    view::{DEFAULT_BINS, Distribution},
};

/// Significance level used for the verdict line.
const REPORT_ALPHA: f64 = 0.05;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let table = util::load_dataset(&arg.dataset.dataset)?;
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &table, &arg.dataset.column)?;
    stdout.flush().context("Failed to flush report")?;
    Ok(())
}

fn write_report<W>(writer: &mut W, table: &Table, column: &str) -> anyhow::Result<()>
where
    W: Write,
{
    let column = randaudit_analysis::resolve_column(column)?;
    let metrics = metrics::calculate_metrics(table, column.name())?;
    let summary = if column.is_numeric() {
        Some(summary::summarize(table, column.name())?)
    } else {
        None
    };
    let fit = match goodness_of_fit::perform_chi_square_test(
        table,
        column.name(),
        &ExpectedDistribution::UniformObserved,
    ) {
        Ok(fit) => Some(fit),
        Err(AnalysisError::DegenerateDistribution { reason }) => {
            tracing::warn!(%reason, "chi-square test skipped");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let title = format!("Randomness Report: {column} ({} rows)", table.len());
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "=".repeat(title.len()))?;
    writeln!(writer)?;

    writeln!(writer, "Metrics")?;
    writeln!(writer, "  unique values:      {}", metrics.num_unique)?;
    writeln!(writer, "  total values:       {}", metrics.num_total)?;
    writeln!(writer, "  proportion unique:  {:.4}", metrics.proportion_unique)?;
    writeln!(
        writer,
        "  most common:        {} ({} times)",
        metrics.most_common, metrics.count_most_common
    )?;
    writeln!(writer)?;

    if let Some(summary) = &summary {
        writeln!(writer, "Summary")?;
        writeln!(writer, "  min / max:          {:.2} / {:.2}", summary.min, summary.max)?;
        writeln!(writer, "  mean:               {:.4}", summary.mean)?;
        writeln!(writer, "  median:             {:.2}", summary.median)?;
        writeln!(writer, "  std dev:            {:.4}", summary.std_dev)?;
        for (p, value) in &summary.quartiles {
            writeln!(writer, "  P{p:<2.0}:                {value:.2}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Chi-square test (uniform over observed values)")?;
    match &fit {
        Some(fit) => {
            writeln!(writer, "  statistic:          {:.4}", fit.statistic)?;
            writeln!(writer, "  degrees of freedom: {}", fit.degrees_of_freedom)?;
            writeln!(writer, "  p-value:            {:.6}", fit.p_value)?;
            let verdict = if fit.rejects_at(REPORT_ALPHA) {
                "uniformity rejected"
            } else {
                "uniformity not rejected"
            };
            writeln!(writer, "  verdict (a={REPORT_ALPHA}):   {verdict}")?;
        }
        None => writeln!(writer, "  not applicable (fewer than 2 distinct values)")?,
    }
    writeln!(writer)?;

    Distribution::from_table(table, column, DEFAULT_BINS).write_to(writer)?;
    Ok(())
}
