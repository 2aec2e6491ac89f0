//! Descriptive statistics of a numeric column.

use randaudit_dataset::{Column, Table};
use randaudit_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use serde::Serialize;

use crate::AnalysisError;

/// Percentile points reported in [`ColumnSummary::quartiles`].
pub const QUARTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: Column,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// `(percentile, value)` pairs for [`QUARTILE_POINTS`].
    pub quartiles: Vec<(f64, f64)>,
}

/// Summarizes the numeric column named `column`.
///
/// Timestamps are summarized as seconds elapsed since the first row.
///
/// # Errors
///
/// - [`AnalysisError::ColumnNotFound`] if `column` is not a column name
/// - [`AnalysisError::InvalidArgument`] for the non-numeric `category` column
/// - [`AnalysisError::EmptyInput`] if the table has no rows
pub fn summarize(table: &Table, column: &str) -> Result<ColumnSummary, AnalysisError> {
    let column = crate::resolve_column(column)?;
    let mut values = table
        .numeric_column(column)
        .ok_or_else(|| AnalysisError::InvalidArgument {
            reason: format!("column '{column}' is not numeric"),
        })?;
    values.sort_by(f64::total_cmp);

    let stats = DescriptiveStats::from_sorted(&values).ok_or(AnalysisError::EmptyInput { column })?;
    let quartiles = Percentiles::from_sorted(&values, &QUARTILE_POINTS);
    Ok(ColumnSummary {
        column,
        count: stats.count,
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        median: stats.median,
        variance: stats.variance,
        std_dev: stats.std_dev,
        quartiles: quartiles.iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::responses;

    #[test]
    fn test_response_summary() {
        let table = responses(&[2, 4, 4, 4, 5, 5, 7, 9]);
        let summary = summarize(&table, "response").unwrap();
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.variance, 4.0);
        assert_eq!(summary.std_dev, 2.0);
        // the two middle values are averaged; the nearest-rank P50 is not
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.quartiles, [(25.0, 4.0), (50.0, 5.0), (75.0, 7.0)]);
    }

    #[test]
    fn test_timestamp_summary_in_seconds() {
        let table = responses(&[1, 1, 1]);
        let summary = summarize(&table, "timestamp").unwrap();
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 120.0);
        assert_eq!(summary.mean, 60.0);
    }

    #[test]
    fn test_rejects_category_and_empty() {
        let err = summarize(&responses(&[1]), "category").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument { .. }));

        let err = summarize(&Table::default(), "response").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyInput {
                column: Column::Response
            }
        );
    }
}
