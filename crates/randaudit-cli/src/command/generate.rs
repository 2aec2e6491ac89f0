use std::path::PathBuf;

use anyhow::Context;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use randaudit_dataset::{SynthConfig, synth::DEFAULT_NUM_ROWS};

use crate::util;

const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Output dataset path
    #[arg(long)]
    output: PathBuf,
    /// Number of rows to generate
    #[arg(long, default_value_t = DEFAULT_NUM_ROWS)]
    rows: usize,
    /// Seed of the random number generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Synthesizer configuration JSON file (defaults apply to missing fields)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_synth_config_file(path)?,
        None => SynthConfig::default(),
    };
    tracing::info!(rows = arg.rows, seed = arg.seed, "generating dataset");

    let mut rng = Pcg32::seed_from_u64(arg.seed);
    config
        .generate(&arg.output, arg.rows, &mut rng)
        .with_context(|| format!("Failed to generate dataset: {}", arg.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use randaudit_dataset::Table;

    use super::*;

    fn generate_arg(output: PathBuf, seed: u64) -> GenerateArg {
        GenerateArg {
            output,
            rows: DEFAULT_NUM_ROWS,
            seed,
            config: None,
        }
    }

    #[test]
    fn test_same_seed_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        run(&generate_arg(first.clone(), DEFAULT_SEED)).unwrap();
        run(&generate_arg(second.clone(), DEFAULT_SEED)).unwrap();

        let first = Table::load(&first).unwrap();
        assert_eq!(first.len(), DEFAULT_NUM_ROWS);
        assert_eq!(first, Table::load(&second).unwrap());
    }

    #[test]
    fn test_zero_rows_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut arg = generate_arg(dir.path().join("empty.csv"), DEFAULT_SEED);
        arg.rows = 0;
        assert!(run(&arg).is_err());
        assert!(!arg.output.exists());
    }
}
