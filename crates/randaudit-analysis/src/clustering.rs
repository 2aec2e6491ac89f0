//! One-dimensional k-means clustering of a numeric column.

use randaudit_dataset::{Column, Table};
use randaudit_stats::kmeans::{KMeans, KMeansError};
use serde::Serialize;

use crate::AnalysisError;

pub const DEFAULT_CLUSTERS: usize = 3;

/// Cluster assignment of every row of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnClustering {
    pub column: Column,
    /// Cluster centroids, ascending. Label `i` refers to `centroids[i]`.
    pub centroids: Vec<f64>,
    /// Cluster label of each row, in row order.
    pub labels: Vec<usize>,
    pub cluster_sizes: Vec<usize>,
    /// Sum of squared distances from each row to its centroid.
    pub inertia: f64,
}

/// Clusters the numeric column named `column` into `n_clusters` groups.
///
/// Timestamps are clustered as seconds elapsed since the first row.
///
/// # Errors
///
/// - [`AnalysisError::ColumnNotFound`] if `column` is not a column name
/// - [`AnalysisError::InvalidArgument`] for the non-numeric `category`
///   column, or if `n_clusters` is zero or exceeds the number of rows
/// - [`AnalysisError::EmptyInput`] if the table has no rows
pub fn perform_clustering(
    table: &Table,
    column: &str,
    n_clusters: usize,
) -> Result<ColumnClustering, AnalysisError> {
    let column = crate::resolve_column(column)?;
    let values = table
        .numeric_column(column)
        .ok_or_else(|| AnalysisError::InvalidArgument {
            reason: format!("column '{column}' is not numeric"),
        })?;
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput { column });
    }

    let fit = KMeans::fit(&values, n_clusters).map_err(|e| match e {
        KMeansError::ZeroClusters | KMeansError::TooFewValues { .. } => {
            AnalysisError::InvalidArgument {
                reason: e.to_string(),
            }
        }
        KMeansError::NonFiniteValue => AnalysisError::DegenerateDistribution {
            reason: e.to_string(),
        },
    })?;
    tracing::debug!(
        %column,
        clusters = n_clusters,
        iterations = fit.iterations,
        inertia = fit.inertia,
        "clustered column"
    );

    Ok(ColumnClustering {
        column,
        cluster_sizes: fit.cluster_sizes(),
        centroids: fit.centroids,
        labels: fit.labels,
        inertia: fit.inertia,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::responses;

    #[test]
    fn test_separated_groups() {
        let table = responses(&[9, 1, 5, 2, 10, 1, 5, 9, 6]);
        let clustering = perform_clustering(&table, "response", DEFAULT_CLUSTERS).unwrap();
        assert_eq!(clustering.labels, [2, 0, 1, 0, 2, 0, 1, 2, 1]);
        assert_eq!(clustering.cluster_sizes, [3, 3, 3]);
        assert!(clustering.centroids.is_sorted());
        assert_eq!(clustering.labels.len(), table.len());
    }

    #[test]
    fn test_deterministic() {
        let table = responses(&[3, 7, 1, 8, 2, 9, 4, 4, 10]);
        let first = perform_clustering(&table, "response", 2).unwrap();
        let second = perform_clustering(&table, "response", 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_timestamp_column() {
        let table = responses(&[1; 6]);
        let clustering = perform_clustering(&table, "timestamp", 2).unwrap();
        assert_eq!(clustering.labels, [0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_invalid_arguments() {
        let table = responses(&[1, 2, 3]);
        for (column, k) in [("category", 2), ("response", 0), ("response", 4)] {
            let err = perform_clustering(&table, column, k).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InvalidArgument { .. }),
                "{column} k={k}: {err}"
            );
        }

        let err = perform_clustering(&table, "answer", 2).unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound { .. }));

        let err = perform_clustering(&Table::default(), "response", 2).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyInput {
                column: Column::Response
            }
        );
    }
}
