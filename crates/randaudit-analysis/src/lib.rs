//! Randomness analysis over guess tables.
//!
//! This crate answers one question about a column of a
//! [`Table`](randaudit_dataset::Table): do its values look like they were
//! drawn uniformly at random?
//!
//! # Overview
//!
//! The analyses are independent; each takes the table and a column name and
//! nothing else:
//!
//! 1. **Metrics** ([`metrics::MetricsRecord`]): Distinct-value counts and the most common value
//! 2. **Goodness of fit** ([`goodness_of_fit::GoodnessOfFit`]): Chi-square test against an
//!    expected distribution (uniform by default)
//! 3. **Summary** ([`summary::ColumnSummary`]): Descriptive statistics of a numeric column
//! 4. **Clustering** ([`clustering::ColumnClustering`]): One-dimensional k-means over a numeric column
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use randaudit_analysis::{goodness_of_fit::{self, ExpectedDistribution}, metrics};
//! use randaudit_dataset::SynthConfig;
//!
//! let table = SynthConfig::default()
//!     .synthesize(300, &mut Pcg32::seed_from_u64(42))
//!     .unwrap();
//!
//! let metrics = metrics::calculate_metrics(&table, "response").unwrap();
//! assert_eq!(metrics.num_total, 300);
//!
//! let test = goodness_of_fit::perform_chi_square_test(
//!     &table,
//!     "response",
//!     &ExpectedDistribution::UniformObserved,
//! )
//! .unwrap();
//! assert!(test.p_value < 0.05);
//! ```

use randaudit_dataset::{Column, record::UnknownColumnError};

pub mod clustering;
pub mod goodness_of_fit;
pub mod metrics;
pub mod summary;

/// Errors raised by the analyses.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[display("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[display("column '{column}' has no rows")]
    EmptyInput {
        #[error(not(source))]
        column: Column,
    },
    #[display("degenerate distribution: {reason}")]
    DegenerateDistribution { reason: String },
}

impl From<UnknownColumnError> for AnalysisError {
    fn from(e: UnknownColumnError) -> Self {
        Self::ColumnNotFound { name: e.name }
    }
}

/// Resolves a column name, mapping unknown names to [`AnalysisError::ColumnNotFound`].
pub fn resolve_column(name: &str) -> Result<Column, AnalysisError> {
    Ok(name.parse::<Column>()?)
}
