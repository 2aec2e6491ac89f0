//! Statistical building blocks for the randaudit project.
//!
//! This crate knows nothing about datasets or columns. It provides:
//!
//! - **Frequency tables**: Count distinct values with a deterministic most-common rule
//! - **Chi-square test**: Pearson goodness-of-fit statistic and p-value
//! - **Descriptive statistics**: Mean, median, variance, standard deviation, etc.
//! - **Percentiles**: Nearest-rank percentile computation
//! - **Histogram generation**: Equal-width frequency distributions for rendering
//! - **K-means**: Deterministic one-dimensional clustering
//!
//! # Modules
//!
//! - [`frequency`]: Frequency tables over ordered values
//! - [`chi_square`]: Chi-square goodness-of-fit testing
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`kmeans`]: Lloyd's algorithm over scalar values
//!
//! # Examples
//!
//! ## Testing counts against a uniform expectation
//!
//! ```
//! use randaudit_stats::{chi_square::ChiSquareTest, frequency::FrequencyTable};
//!
//! let guesses = [7, 7, 7, 7, 3, 7, 1, 7, 7, 2];
//! let table = guesses.into_iter().collect::<FrequencyTable<i64>>();
//! let observed = table.iter().map(|(_, count)| count).collect::<Vec<_>>();
//! let expected = vec![table.total() as f64 / observed.len() as f64; observed.len()];
//! let test = ChiSquareTest::new(&observed, &expected).unwrap();
//! assert!(test.statistic > 0.0);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use randaudit_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```

pub mod chi_square;
pub mod descriptive;
pub mod frequency;
pub mod histogram;
pub mod kmeans;
pub mod percentiles;
