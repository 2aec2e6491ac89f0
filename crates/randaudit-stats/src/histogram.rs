use std::ops::Range;

/// An equal-width histogram of a numeric dataset.
///
/// The bins evenly split `[min, max]`. Every bin covers a half-open range
/// except the last, which also contains `max` so no value falls outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Values covered by this bin (inclusive start, exclusive end; the last
    /// bin also includes its end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` bins spanning the data range.
    ///
    /// `explicit_min` and `explicit_max` override the bounds detected from
    /// the data. Values outside explicit bounds are clamped into the first
    /// or last bin. An empty input or `num_bins == 0` yields no bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use randaudit_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 4.0, 5.0];
    /// let histogram = Histogram::new(values, 5, None, None);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 1, 3, 1]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(
        values: I,
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = explicit_min.unwrap_or_else(|| values.iter().copied().fold(f64::INFINITY, f64::min));
        let max =
            explicit_max.unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        let mut width = (max - min) / num_bins as f64;
        if width < f64::EPSILON {
            // all values are equal: one unit per bin
            width = 1.0;
        }

        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                // Recompute each boundary from `min` to avoid accumulating error
                range: min + idx as f64 * width..min + (idx + 1) as f64 * width,
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let position = ((val - min) / width).floor();
            let idx = if position <= 0.0 {
                0
            } else {
                (position as usize).min(num_bins - 1)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }
}
