//! One-dimensional k-means clustering.
//!
//! Lloyd's algorithm over scalar values: assign each value to its nearest
//! centroid, move each centroid to the mean of its members, repeat until no
//! assignment changes. Initial centroids are taken at evenly spaced
//! quantiles of the data, so the result is deterministic.

use crate::percentiles;

/// Default cap on Lloyd iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum KMeansError {
    #[display("number of clusters must be positive")]
    ZeroClusters,
    #[display("cannot form {clusters} clusters from {values} values")]
    TooFewValues { clusters: usize, values: usize },
    #[display("values must be finite")]
    NonFiniteValue,
}

/// Fitted clustering of a set of scalar values.
///
/// Clusters are numbered by ascending centroid: label 0 is the cluster with
/// the smallest centroid.
///
/// # Examples
///
/// ```
/// use randaudit_stats::kmeans::KMeans;
///
/// let values = [1.0, 1.5, 2.0, 10.0, 10.5, 11.0];
/// let fit = KMeans::fit(&values, 2).unwrap();
/// assert_eq!(fit.labels, [0, 0, 0, 1, 1, 1]);
/// assert_eq!(fit.centroids, [1.5, 10.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    /// Cluster centroids, ascending.
    pub centroids: Vec<f64>,
    /// Cluster label of each input value, in input order.
    pub labels: Vec<usize>,
    /// Sum of squared distances from each value to its centroid.
    pub inertia: f64,
    /// Number of Lloyd iterations run.
    pub iterations: usize,
}

impl KMeans {
    /// Clusters `values` into `k` groups with [`DEFAULT_MAX_ITERATIONS`].
    pub fn fit(values: &[f64], k: usize) -> Result<Self, KMeansError> {
        Self::fit_with_limit(values, k, DEFAULT_MAX_ITERATIONS)
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn fit_with_limit(
        values: &[f64],
        k: usize,
        max_iterations: usize,
    ) -> Result<Self, KMeansError> {
        if k == 0 {
            return Err(KMeansError::ZeroClusters);
        }
        if values.len() < k {
            return Err(KMeansError::TooFewValues {
                clusters: k,
                values: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(KMeansError::NonFiniteValue);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mut centroids = (0..k)
            .map(|i| percentiles::compute_percentile(&sorted, (i as f64 + 0.5) * 100.0 / k as f64))
            .collect::<Vec<_>>();

        let mut labels = vec![usize::MAX; values.len()];
        let mut iterations = 0;
        while iterations < max_iterations {
            iterations += 1;
            let mut changed = false;
            for (label, &value) in labels.iter_mut().zip(values) {
                let nearest = nearest_centroid(&centroids, value);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }
            if !changed {
                break;
            }

            let mut sums = vec![0.0; k];
            let mut counts = vec![0_usize; k];
            for (&label, &value) in labels.iter().zip(values) {
                sums[label] += value;
                counts[label] += 1;
            }
            for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
                // an empty cluster keeps its previous centroid
                if count > 0 {
                    *centroid = sum / count as f64;
                }
            }
        }

        // Renumber clusters by ascending centroid.
        let mut order = (0..k).collect::<Vec<_>>();
        order.sort_by(|&a, &b| centroids[a].total_cmp(&centroids[b]).then(a.cmp(&b)));
        let mut rank = vec![0; k];
        for (new_label, &old_label) in order.iter().enumerate() {
            rank[old_label] = new_label;
        }
        let centroids = order.iter().map(|&i| centroids[i]).collect::<Vec<_>>();
        let labels = labels.into_iter().map(|l| rank[l]).collect::<Vec<_>>();
        let inertia = labels
            .iter()
            .zip(values)
            .map(|(&l, &v)| (v - centroids[l]).powi(2))
            .sum();

        Ok(Self {
            centroids,
            labels,
            inertia,
            iterations,
        })
    }

    /// Number of values assigned to each cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Index of the centroid closest to `value`; the lowest index wins on ties.
fn nearest_centroid(centroids: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, &centroid) in centroids.iter().enumerate() {
        let distance = (value - centroid).abs();
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}
