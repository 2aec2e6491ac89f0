//! Pearson's chi-square goodness-of-fit test.
//!
//! Compares observed category counts against expected counts:
//!
//! ```text
//! χ² = Σ (observed_i - expected_i)² / expected_i
//! ```
//!
//! The p-value is the upper-tail probability of the chi-square distribution
//! with `k - 1` degrees of freedom, where `k` is the number of categories.

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Reasons a chi-square test cannot be formed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ChiSquareError {
    #[display("observed has {observed} categories but expected has {expected}")]
    LengthMismatch { observed: usize, expected: usize },
    #[display("at least 2 categories are required, got {count}")]
    TooFewCategories { count: usize },
    #[display("expected count for category #{index} is zero")]
    ZeroExpected { index: usize },
    #[display("expected count for category #{index} is not a finite non-negative number ({value})")]
    InvalidExpected { index: usize, value: f64 },
}

/// Result of a chi-square goodness-of-fit test.
///
/// # Examples
///
/// ```
/// use randaudit_stats::chi_square::ChiSquareTest;
///
/// let test = ChiSquareTest::new(&[100, 100, 100, 100], &[100.0; 4]).unwrap();
/// assert_eq!(test.statistic, 0.0);
/// assert_eq!(test.degrees_of_freedom, 3);
/// assert_eq!(test.p_value, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareTest {
    /// The chi-square statistic. Always non-negative.
    pub statistic: f64,
    /// Number of categories minus one.
    pub degrees_of_freedom: usize,
    /// Upper-tail probability of the statistic under the null hypothesis, in `[0, 1]`.
    pub p_value: f64,
}

impl ChiSquareTest {
    /// Runs the test over paired observed and expected counts.
    ///
    /// Expected counts must all be finite and strictly positive. A zero
    /// expected count is reported as an error instead of being skipped, since
    /// skipping would silently change the degrees of freedom.
    pub fn new(observed: &[u64], expected: &[f64]) -> Result<Self, ChiSquareError> {
        if observed.len() != expected.len() {
            return Err(ChiSquareError::LengthMismatch {
                observed: observed.len(),
                expected: expected.len(),
            });
        }
        if observed.len() < 2 {
            return Err(ChiSquareError::TooFewCategories {
                count: observed.len(),
            });
        }

        let mut statistic = 0.0;
        for (index, (&obs, &exp)) in observed.iter().zip(expected).enumerate() {
            if !exp.is_finite() || exp < 0.0 {
                return Err(ChiSquareError::InvalidExpected { index, value: exp });
            }
            if exp == 0.0 {
                return Err(ChiSquareError::ZeroExpected { index });
            }
            #[expect(clippy::cast_precision_loss)]
            let diff = obs as f64 - exp;
            statistic += diff * diff / exp;
        }

        let degrees_of_freedom = observed.len() - 1;
        let p_value = upper_tail(statistic, degrees_of_freedom);
        Ok(Self {
            statistic,
            degrees_of_freedom,
            p_value,
        })
    }
}

/// Survival function of χ²(`degrees_of_freedom`) evaluated at `statistic`.
#[expect(clippy::cast_precision_loss)]
fn upper_tail(statistic: f64, degrees_of_freedom: usize) -> f64 {
    if statistic <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(degrees_of_freedom as f64) {
        Ok(dist) => dist.sf(statistic).clamp(0.0, 1.0),
        // degrees_of_freedom >= 1 is checked by the caller
        Err(_) => f64::NAN,
    }
}
