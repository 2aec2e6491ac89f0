use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use randaudit_analysis::goodness_of_fit::{self, ExpectedDistribution};
use randaudit_dataset::{Column, Value};

use crate::{command::DatasetArg, util};

const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChiSquareArg {
    #[command(flatten)]
    pub dataset: DatasetArg,
    /// Expect a uniform distribution over these values (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "weights")]
    categories: Option<Vec<String>>,
    /// Expect a distribution proportional to these weights (comma-separated `value=weight`)
    #[arg(long, value_delimiter = ',')]
    weights: Option<Vec<String>>,
    /// Significance level
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    /// Output JSON path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ChiSquareArg) -> anyhow::Result<()> {
    let column = randaudit_analysis::resolve_column(&arg.dataset.column)?;
    let expected = expected_distribution(column, arg.categories.as_deref(), arg.weights.as_deref())?;

    let table = util::load_dataset(&arg.dataset.dataset)?;
    let result = goodness_of_fit::perform_chi_square_test(&table, &arg.dataset.column, &expected)?;
    if result.rejects_at(arg.alpha) {
        tracing::info!(
            p_value = result.p_value,
            alpha = arg.alpha,
            "uniformity rejected: responses are biased"
        );
    } else {
        tracing::info!(
            p_value = result.p_value,
            alpha = arg.alpha,
            "uniformity not rejected"
        );
    }
    util::Output::save_json(&result, arg.output.clone())?;
    Ok(())
}

fn expected_distribution(
    column: Column,
    categories: Option<&[String]>,
    weights: Option<&[String]>,
) -> anyhow::Result<ExpectedDistribution> {
    let parse_value = |s: &str| {
        Value::parse(column, s.trim())
            .with_context(|| format!("Invalid {column} value: '{s}'"))
    };

    if let Some(categories) = categories {
        let values = categories
            .iter()
            .map(|s| parse_value(s))
            .collect::<anyhow::Result<Vec<_>>>()?;
        return Ok(ExpectedDistribution::Uniform(values));
    }
    if let Some(weights) = weights {
        let mut map = BTreeMap::new();
        for entry in weights {
            let (value, weight) = entry
                .split_once('=')
                .with_context(|| format!("Expected `value=weight`, got '{entry}'"))?;
            let weight = weight
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid weight in '{entry}'"))?;
            if map.insert(parse_value(value)?, weight).is_some() {
                anyhow::bail!("Duplicate weight for '{}'", value.trim());
            }
        }
        return Ok(ExpectedDistribution::Weighted(map));
    }
    Ok(ExpectedDistribution::UniformObserved)
}

#[cfg(test)]
mod tests {
    use randaudit_dataset::Category;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_is_uniform_over_observed() {
        let expected = expected_distribution(Column::Response, None, None).unwrap();
        assert_eq!(expected, ExpectedDistribution::UniformObserved);
    }

    #[test]
    fn test_parse_categories() {
        let expected =
            expected_distribution(Column::Category, Some(&strings(&["A", " B", "C"])), None)
                .unwrap();
        assert_eq!(
            expected,
            ExpectedDistribution::Uniform(vec![
                Value::Category(Category::A),
                Value::Category(Category::B),
                Value::Category(Category::C),
            ])
        );
        assert!(expected_distribution(Column::Category, Some(&strings(&["E"])), None).is_err());
    }

    #[test]
    fn test_parse_weights() {
        let expected =
            expected_distribution(Column::Response, None, Some(&strings(&["1=0.5", "2=1.5"])))
                .unwrap();
        let ExpectedDistribution::Weighted(weights) = expected else {
            panic!("expected weighted distribution");
        };
        assert_eq!(weights[&Value::Integer(1)], 0.5);
        assert_eq!(weights[&Value::Integer(2)], 1.5);

        for bad in [vec!["1"], vec!["x=1"], vec!["1=heavy"], vec!["1=1", "1=2"]] {
            assert!(
                expected_distribution(Column::Response, None, Some(&strings(&bad))).is_err(),
                "{bad:?}"
            );
        }
    }
}
