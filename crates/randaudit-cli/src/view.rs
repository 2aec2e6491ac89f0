//! Text rendering of column distributions.

use std::{
    fmt,
    io::{self, Write},
};

use randaudit_analysis::metrics;
use randaudit_dataset::{Column, Table};
use randaudit_stats::histogram::Histogram;

pub const DEFAULT_BINS: usize = 10;

const MAX_BAR_WIDTH: u64 = 50;

/// Labelled counts of one column, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub title: String,
    pub bars: Vec<(String, u64)>,
}

impl Distribution {
    /// Counts each distinct value of a non-numeric column, or bins a numeric
    /// column into `num_bins` equal-width bins.
    pub fn from_table(table: &Table, column: Column, num_bins: usize) -> Self {
        let title = format!("{column} distribution");
        let bars = match table.numeric_column(column) {
            Some(values) => {
                let histogram = Histogram::new(values, num_bins, None, None);
                histogram
                    .bins
                    .iter()
                    .map(|bin| {
                        let label = format!("{:.1}..{:.1}", bin.range.start, bin.range.end);
                        (label, bin.count)
                    })
                    .collect()
            }
            None => metrics::column_frequencies(table, column)
                .iter()
                .map(|(value, count)| (value.to_string(), count))
                .collect(),
        };
        Self { title, bars }
    }

    pub fn write_to<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(writer, "{}", self.title)?;
        writeln!(writer, "{}", "-".repeat(self.title.len()))?;
        write_histogram(writer, self.bars.iter().map(|(label, count)| (label, *count)))
    }

    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }
}

#[expect(clippy::cast_possible_truncation)]
fn write_histogram<W, I, S>(writer: &mut W, data: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = (S, u64)>,
    S: fmt::Display,
{
    let data = data.collect::<Vec<_>>();
    let max_count = data.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    for (label, count) in &data {
        let bar_width = (count * MAX_BAR_WIDTH) / max_count;
        writeln!(
            writer,
            "{:>15} | {:<5} {}",
            label,
            count,
            "#".repeat(bar_width as usize)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use randaudit_dataset::{Category, Record};

    use super::*;

    fn sample_table() -> Table {
        let origin = randaudit_dataset::SynthConfig::default().origin;
        [
            (1, Category::A),
            (1, Category::C),
            (2, Category::A),
            (4, Category::A),
        ]
        .into_iter()
        .map(|(response, category)| Record {
            response,
            category,
            timestamp: origin,
        })
        .collect()
    }

    #[test]
    fn test_category_bars_per_value() {
        let distribution = Distribution::from_table(&sample_table(), Column::Category, DEFAULT_BINS);
        assert_eq!(distribution.title, "category distribution");
        assert_eq!(
            distribution.bars,
            [("A".to_owned(), 3), ("C".to_owned(), 1)]
        );
    }

    #[test]
    fn test_numeric_bins() {
        let distribution = Distribution::from_table(&sample_table(), Column::Response, 3);
        let counts = distribution.bars.iter().map(|(_, c)| *c).collect::<Vec<_>>();
        assert_eq!(counts, [2, 1, 1]);
        assert_eq!(distribution.bars[0].0, "1.0..2.0");
    }

    #[test]
    fn test_bars_scale_to_largest_count() {
        let distribution = Distribution::from_table(&sample_table(), Column::Category, DEFAULT_BINS);
        let mut out = vec![];
        distribution.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "category distribution");
        assert!(lines[2].ends_with(&"#".repeat(50)));
        assert!(lines[3].ends_with(&format!(" {}", "#".repeat(16))));
    }

    #[test]
    fn test_empty_table_draws_only_title() {
        let distribution = Distribution::from_table(&Table::default(), Column::Response, DEFAULT_BINS);
        assert!(distribution.bars.is_empty());
        let mut out = vec![];
        distribution.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
