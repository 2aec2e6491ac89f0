//! Frequency-based randomness metrics for one column.

use randaudit_dataset::{Column, Table, Value};
use randaudit_stats::frequency::FrequencyTable;
use serde::Serialize;

use crate::AnalysisError;

/// Randomness metrics of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    /// Number of distinct values in the column.
    pub num_unique: usize,
    /// Number of rows.
    pub num_total: usize,
    /// `num_unique / num_total`, in `(0, 1]`.
    pub proportion_unique: f64,
    /// The most frequent value. When several values are equally frequent,
    /// the smallest one.
    pub most_common: Value,
    /// How often `most_common` occurs.
    pub count_most_common: u64,
}

impl MetricsRecord {
    /// Computes the metrics of `column` from its frequency table.
    ///
    /// Returns `None` if the frequency table is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_frequencies(frequencies: &FrequencyTable<Value>) -> Option<Self> {
        let (&most_common, count_most_common) = frequencies.most_common()?;
        let num_unique = frequencies.num_unique();
        let num_total = usize::try_from(frequencies.total()).ok()?;
        Some(Self {
            num_unique,
            num_total,
            proportion_unique: num_unique as f64 / num_total as f64,
            most_common,
            count_most_common,
        })
    }
}

/// Builds the frequency table of one column in a single pass.
#[must_use]
pub fn column_frequencies(table: &Table, column: Column) -> FrequencyTable<Value> {
    table.column(column).collect()
}

/// Calculates randomness metrics for the column named `column`.
///
/// # Errors
///
/// - [`AnalysisError::ColumnNotFound`] if `column` is not a column name
/// - [`AnalysisError::EmptyInput`] if the table has no rows
pub fn calculate_metrics(table: &Table, column: &str) -> Result<MetricsRecord, AnalysisError> {
    let column = crate::resolve_column(column)?;
    let frequencies = column_frequencies(table, column);
    let metrics =
        MetricsRecord::from_frequencies(&frequencies).ok_or(AnalysisError::EmptyInput { column })?;
    tracing::debug!(
        %column,
        num_unique = metrics.num_unique,
        num_total = metrics.num_total,
        "calculated metrics"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use randaudit_dataset::Category;

    use super::*;
    use crate::test_util::{responses, table_from};

    #[test]
    fn test_basic_metrics() {
        let table = responses(&[1, 2, 2, 3, 3, 3]);
        let metrics = calculate_metrics(&table, "response").unwrap();
        assert_eq!(metrics.num_unique, 3);
        assert_eq!(metrics.num_total, 6);
        assert_eq!(metrics.proportion_unique, 0.5);
        assert_eq!(metrics.most_common, Value::Integer(3));
        assert_eq!(metrics.count_most_common, 3);
    }

    #[test]
    fn test_all_distinct() {
        let table = responses(&[4, 1, 3]);
        let metrics = calculate_metrics(&table, "response").unwrap();
        assert_eq!(metrics.proportion_unique, 1.0);
        assert_eq!(metrics.most_common, Value::Integer(1));
        assert_eq!(metrics.count_most_common, 1);
    }

    #[test]
    fn test_tie_break_smallest_value() {
        let table = responses(&[9, 4, 9, 4, 7]);
        for _ in 0..10 {
            let metrics = calculate_metrics(&table, "response").unwrap();
            assert_eq!(metrics.most_common, Value::Integer(4));
            assert_eq!(metrics.count_most_common, 2);
        }

        let table = table_from(&[(1, Category::D), (1, Category::B), (1, Category::D), (1, Category::B)]);
        let metrics = calculate_metrics(&table, "category").unwrap();
        assert_eq!(metrics.most_common, Value::Category(Category::B));
    }

    #[test]
    fn test_idempotent() {
        let table = responses(&[5, 5, 1, 2, 10, 5, 2]);
        let first = calculate_metrics(&table, "response").unwrap();
        let second = calculate_metrics(&table, "response").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.proportion_unique.to_bits(),
            second.proportion_unique.to_bits()
        );
    }

    #[test]
    fn test_timestamp_column_is_all_unique() {
        let table = responses(&[1, 1, 1, 1]);
        let metrics = calculate_metrics(&table, "timestamp").unwrap();
        assert_eq!(metrics.num_unique, 4);
        assert_eq!(metrics.count_most_common, 1);
    }

    #[test]
    fn test_invariants_hold() {
        let table = responses(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        let metrics = calculate_metrics(&table, "response").unwrap();
        assert!(metrics.num_unique <= metrics.num_total);
        assert!(metrics.proportion_unique > 0.0 && metrics.proportion_unique <= 1.0);
        assert_eq!(
            metrics.proportion_unique,
            metrics.num_unique as f64 / metrics.num_total as f64
        );
        assert!(metrics.count_most_common >= 1);
        assert!(metrics.count_most_common <= metrics.num_total as u64);
    }

    #[test]
    fn test_serialize_json() {
        let metrics = calculate_metrics(&responses(&[2, 2, 8, 5]), "response").unwrap();
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "num_unique": 3,
                "num_total": 4,
                "proportion_unique": 0.75,
                "most_common": 2,
                "count_most_common": 2,
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let err = calculate_metrics(&Table::default(), "response").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyInput {
                column: Column::Response
            }
        );
    }

    #[test]
    fn test_unknown_column() {
        let err = calculate_metrics(&responses(&[1]), "guess").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ColumnNotFound {
                name: "guess".to_owned()
            }
        );
    }
}
