//! Synthetic "human random guess" dataset generation.
//!
//! People asked to pick a number "at random" do not pick uniformly. The
//! synthesizer models this with a fixed, non-uniform weight vector over the
//! response range, so a goodness-of-fit test against a uniform distribution
//! has something to detect.
//!
//! All randomness comes from the generator passed in by the caller. Using
//! the same seeded generator and configuration yields the same table.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use randaudit_dataset::synth::SynthConfig;
//!
//! let config = SynthConfig::default();
//! let table = config.synthesize(300, &mut Pcg32::seed_from_u64(42)).unwrap();
//! assert_eq!(table.len(), 300);
//! ```

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};
use serde::{Deserialize, Serialize};

use crate::{
    DatasetError,
    record::{Category, Record},
    table::Table,
};

/// Default number of rows to generate.
pub const DEFAULT_NUM_ROWS: usize = 300;

/// Default response weights for the values 1 through 10.
///
/// Value 5 is drawn twice as often as a uniform guess would be; 3, 9 and 10
/// half as often.
pub const DEFAULT_WEIGHTS: [f64; 10] = [0.10, 0.15, 0.05, 0.10, 0.20, 0.10, 0.10, 0.10, 0.05, 0.05];

/// Parameters of the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Smallest response value (inclusive).
    pub low: i64,
    /// Largest response value (inclusive).
    pub high: i64,
    /// Relative weight of each response value, starting from `low`.
    pub weights: Vec<f64>,
    /// Timestamp of the first row.
    pub origin: NaiveDateTime,
    /// Seconds between consecutive rows.
    pub interval_secs: i64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            low: 1,
            high: 10,
            weights: DEFAULT_WEIGHTS.to_vec(),
            origin: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            interval_secs: 60,
        }
    }
}

impl SynthConfig {
    /// Checks that the configuration describes a valid weighted draw.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.low > self.high {
            return Err(DatasetError::invalid_argument(format!(
                "response range is empty ({}..={})",
                self.low, self.high
            )));
        }
        // one weight per value of low..=high
        let span = self.high.abs_diff(self.low);
        let weights_span = self
            .weights
            .len()
            .checked_sub(1)
            .and_then(|n| u64::try_from(n).ok());
        if weights_span != Some(span) {
            return Err(DatasetError::invalid_argument(format!(
                "expected {} weights for {}..={}, got {}",
                u128::from(span) + 1,
                self.low,
                self.high,
                self.weights.len()
            )));
        }
        if let Some(w) = self.weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(DatasetError::invalid_argument(format!(
                "weights must be finite and non-negative, got {w}"
            )));
        }
        if self.weights.iter().sum::<f64>() <= 0.0 {
            return Err(DatasetError::invalid_argument("weights must not all be zero"));
        }
        if self.interval_secs <= 0 {
            return Err(DatasetError::invalid_argument(format!(
                "timestamp interval must be positive, got {}s",
                self.interval_secs
            )));
        }
        Ok(())
    }

    /// Generates a table of `num_rows` guesses.
    ///
    /// - `response` is a weighted draw over `low..=high`
    /// - `category` is a uniform draw over [`Category::ALL`], independent of `response`
    /// - `timestamp` is `origin + row_index * interval_secs`
    pub fn synthesize<R>(&self, num_rows: usize, rng: &mut R) -> Result<Table, DatasetError>
    where
        R: Rng,
    {
        if num_rows == 0 {
            return Err(DatasetError::invalid_argument(
                "number of rows must be positive",
            ));
        }
        self.validate()?;

        let responses = WeightedIndex::new(&self.weights)
            .map_err(|e| DatasetError::invalid_argument(format!("invalid weights: {e}")))?;
        let interval = TimeDelta::try_seconds(self.interval_secs).ok_or_else(|| {
            DatasetError::invalid_argument(format!(
                "timestamp interval out of range: {}s",
                self.interval_secs
            ))
        })?;

        let mut timestamp = self.origin;
        let mut records = Vec::with_capacity(num_rows);
        for row in 0..num_rows {
            if row > 0 {
                timestamp = timestamp.checked_add_signed(interval).ok_or_else(|| {
                    DatasetError::invalid_argument(format!("timestamp overflow at row {row}"))
                })?;
            }
            let offset = i64::try_from(responses.sample(rng)).map_err(|_| {
                DatasetError::invalid_argument("response range is too large")
            })?;
            let category = Category::ALL[rng.random_range(0..Category::LEN)];
            records.push(Record {
                response: self.low + offset,
                category,
                timestamp,
            });
        }
        tracing::debug!(rows = num_rows, low = self.low, high = self.high, "synthesized dataset");
        Ok(Table::new(records))
    }

    /// Generates a table and writes it to `path`, overwriting any previous content.
    pub fn generate<P, R>(
        &self,
        path: P,
        num_rows: usize,
        rng: &mut R,
    ) -> Result<Table, DatasetError>
    where
        P: AsRef<Path>,
        R: Rng,
    {
        let table = self.synthesize(num_rows, rng)?;
        table.save(path)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::record::Column;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    mod synthesize {
        use super::*;

        #[test]
        fn test_row_count_and_ranges() {
            let config = SynthConfig::default();
            for num_rows in [1, 2, 17, 300, 1000] {
                let table = config.synthesize(num_rows, &mut rng(7)).unwrap();
                assert_eq!(table.len(), num_rows);
                assert!(
                    table
                        .records()
                        .iter()
                        .all(|r| (config.low..=config.high).contains(&r.response))
                );
                assert!(
                    table
                        .records()
                        .iter()
                        .all(|r| Category::ALL.contains(&r.category))
                );
            }
        }

        #[test]
        fn test_timestamps_are_evenly_spaced() {
            let config = SynthConfig::default();
            let table = config.synthesize(5, &mut rng(1)).unwrap();
            assert_eq!(table.records()[0].timestamp, config.origin);
            assert_eq!(
                table.numeric_column(Column::Timestamp),
                Some(vec![0.0, 60.0, 120.0, 180.0, 240.0])
            );
        }

        #[test]
        fn test_same_seed_same_table() {
            let config = SynthConfig::default();
            let a = config.synthesize(300, &mut rng(42)).unwrap();
            let b = config.synthesize(300, &mut rng(42)).unwrap();
            let c = config.synthesize(300, &mut rng(43)).unwrap();
            assert_eq!(a, b);
            assert_ne!(a, c);
        }

        #[test]
        fn test_zero_weight_value_never_drawn() {
            let config = SynthConfig {
                low: 0,
                high: 2,
                weights: vec![1.0, 0.0, 1.0],
                ..SynthConfig::default()
            };
            let table = config.synthesize(500, &mut rng(3)).unwrap();
            assert!(table.records().iter().all(|r| r.response != 1));
        }

        #[test]
        fn test_zero_rows_is_invalid() {
            let err = SynthConfig::default()
                .synthesize(0, &mut rng(0))
                .unwrap_err();
            assert!(matches!(err, DatasetError::InvalidArgument { .. }));
        }
    }

    mod validate {
        use super::*;

        fn invalid(config: &SynthConfig) -> bool {
            matches!(
                config.validate(),
                Err(DatasetError::InvalidArgument { .. })
            )
        }

        #[test]
        fn test_default_is_valid() {
            assert!(SynthConfig::default().validate().is_ok());
        }

        #[test]
        fn test_invalid_configs() {
            let base = SynthConfig::default();
            assert!(invalid(&SynthConfig {
                low: 5,
                high: 4,
                ..base.clone()
            }));
            assert!(invalid(&SynthConfig {
                weights: vec![1.0; 9],
                ..base.clone()
            }));
            let mut negative = base.clone();
            negative.weights[0] = -0.1;
            assert!(invalid(&negative));
            assert!(invalid(&SynthConfig {
                weights: vec![0.0; 10],
                ..base.clone()
            }));
            assert!(invalid(&SynthConfig {
                interval_secs: 0,
                ..base
            }));
        }

        #[test]
        fn test_full_i64_range_is_rejected_without_overflow() {
            let config = SynthConfig {
                low: i64::MIN,
                high: i64::MAX,
                weights: vec![],
                ..SynthConfig::default()
            };
            assert!(invalid(&config));
            assert!(invalid(&SynthConfig {
                weights: vec![1.0],
                ..config.clone()
            }));
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("18446744073709551616 weights"), "{err}");
        }

        #[test]
        fn test_single_value_range() {
            let config = SynthConfig {
                low: 3,
                high: 3,
                weights: vec![1.0],
                ..SynthConfig::default()
            };
            assert!(config.validate().is_ok());
            assert!(invalid(&SynthConfig {
                weights: vec![],
                ..config
            }));
        }

        #[test]
        fn test_config_from_partial_json() {
            let config: SynthConfig =
                serde_json::from_str(r#"{"low": 1, "high": 3, "weights": [1, 2, 1]}"#).unwrap();
            assert_eq!(config.weights, [1.0, 2.0, 1.0]);
            assert_eq!(config.interval_secs, 60);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_generate_writes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("random_guess_dataset.csv");
        let table = SynthConfig::default()
            .generate(&path, 50, &mut rng(42))
            .unwrap();
        assert_eq!(Table::load(&path).unwrap(), table);
    }
}
