//! Chi-square goodness-of-fit test of a column against an expected distribution.
//!
//! # Zero Expected Counts
//!
//! A category whose expected count is zero makes the statistic undefined.
//! Such a category is never skipped: the test fails with
//! [`AnalysisError::DegenerateDistribution`]. This covers a zero weight, and
//! an observed value that the expected distribution does not mention.

use std::collections::{BTreeMap, BTreeSet};

use randaudit_dataset::{Column, Table, Value};
use randaudit_stats::{
    chi_square::{ChiSquareError, ChiSquareTest},
    frequency::FrequencyTable,
};
use serde::Serialize;

use crate::{AnalysisError, metrics::column_frequencies};

/// The distribution that the null hypothesis says the column follows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExpectedDistribution {
    /// Uniform over the distinct values that were actually observed.
    #[default]
    UniformObserved,
    /// Uniform over an explicit set of values. Values in the set that never
    /// occur count as observed zero times.
    Uniform(Vec<Value>),
    /// Proportional to the given non-negative weights.
    Weighted(BTreeMap<Value, f64>),
}

/// Observed and expected counts of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: Value,
    pub observed: u64,
    pub expected: f64,
}

/// Result of testing one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodnessOfFit {
    pub column: Column,
    /// The chi-square statistic.
    pub statistic: f64,
    /// Number of categories minus one.
    pub degrees_of_freedom: usize,
    /// Probability of a statistic at least this large if the null hypothesis holds.
    pub p_value: f64,
    /// Per-category counts, in ascending value order.
    pub categories: Vec<CategoryCount>,
}

impl GoodnessOfFit {
    /// Returns `true` if the null hypothesis is rejected at significance level `alpha`.
    #[must_use]
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Tests whether the column named `column` follows `expected`.
///
/// # Errors
///
/// - [`AnalysisError::ColumnNotFound`] if `column` is not a column name
/// - [`AnalysisError::EmptyInput`] if the table has no rows
/// - [`AnalysisError::InvalidArgument`] if a weight is negative or not finite,
///   or an expected value belongs to a different column
/// - [`AnalysisError::DegenerateDistribution`] if fewer than two categories
///   remain or any category has an expected count of zero
pub fn perform_chi_square_test(
    table: &Table,
    column: &str,
    expected: &ExpectedDistribution,
) -> Result<GoodnessOfFit, AnalysisError> {
    let column = crate::resolve_column(column)?;
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput { column });
    }
    let frequencies = column_frequencies(table, column);
    let weights = category_weights(column, &frequencies, expected)?;

    if let Some(value) = frequencies.values().find(|v| !weights.contains_key(*v)) {
        return Err(AnalysisError::DegenerateDistribution {
            reason: format!("observed value {value} has no expected count"),
        });
    }
    if weights.len() < 2 {
        return Err(AnalysisError::DegenerateDistribution {
            reason: format!(
                "at least 2 categories are required, got {}",
                weights.len()
            ),
        });
    }
    let weight_sum = weights.values().sum::<f64>();
    if weight_sum <= 0.0 {
        return Err(AnalysisError::DegenerateDistribution {
            reason: "all expected weights are zero".to_owned(),
        });
    }

    #[expect(clippy::cast_precision_loss)]
    let total = frequencies.total() as f64;
    let categories = weights
        .iter()
        .map(|(&value, &weight)| CategoryCount {
            value,
            observed: frequencies.count(&value),
            expected: total * weight / weight_sum,
        })
        .collect::<Vec<_>>();
    if let Some(zero) = categories.iter().find(|c| c.expected <= 0.0) {
        return Err(AnalysisError::DegenerateDistribution {
            reason: format!("expected count of {} is zero", zero.value),
        });
    }

    let observed = categories.iter().map(|c| c.observed).collect::<Vec<_>>();
    let expected = categories.iter().map(|c| c.expected).collect::<Vec<_>>();
    let test = ChiSquareTest::new(&observed, &expected).map_err(|e| match e {
        ChiSquareError::InvalidExpected { .. } => AnalysisError::InvalidArgument {
            reason: e.to_string(),
        },
        _ => AnalysisError::DegenerateDistribution {
            reason: e.to_string(),
        },
    })?;

    tracing::debug!(
        %column,
        statistic = test.statistic,
        degrees_of_freedom = test.degrees_of_freedom,
        p_value = test.p_value,
        "chi-square test"
    );
    Ok(GoodnessOfFit {
        column,
        statistic: test.statistic,
        degrees_of_freedom: test.degrees_of_freedom,
        p_value: test.p_value,
        categories,
    })
}

/// Resolves the expected distribution into a weight per category.
fn category_weights(
    column: Column,
    frequencies: &FrequencyTable<Value>,
    expected: &ExpectedDistribution,
) -> Result<BTreeMap<Value, f64>, AnalysisError> {
    let check_column = |value: &Value| {
        if value.column() == column {
            Ok(())
        } else {
            Err(AnalysisError::InvalidArgument {
                reason: format!("expected value {value} does not belong to column '{column}'"),
            })
        }
    };

    match expected {
        ExpectedDistribution::UniformObserved => {
            Ok(frequencies.values().map(|&value| (value, 1.0)).collect())
        }
        ExpectedDistribution::Uniform(values) => {
            values.iter().try_for_each(check_column)?;
            Ok(values
                .iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|&value| (value, 1.0))
                .collect())
        }
        ExpectedDistribution::Weighted(weights) => {
            for (value, &weight) in weights {
                check_column(value)?;
                if !weight.is_finite() || weight < 0.0 {
                    return Err(AnalysisError::InvalidArgument {
                        reason: format!(
                            "weight of {value} must be finite and non-negative, got {weight}"
                        ),
                    });
                }
            }
            Ok(weights.clone())
        }
    }
}
