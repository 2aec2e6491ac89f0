use std::collections::{BTreeMap, btree_map};

/// Frequency counts of distinct values in a dataset.
///
/// Values are kept in ascending order, so iteration is deterministic and
/// independent of the order in which observations were added.
///
/// # Examples
///
/// ```
/// use randaudit_stats::frequency::FrequencyTable;
///
/// let table = [1, 2, 2, 3, 3, 3].into_iter().collect::<FrequencyTable<i64>>();
/// assert_eq!(table.total(), 6);
/// assert_eq!(table.num_unique(), 3);
/// assert_eq!(table.most_common(), Some((&3, 3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T> {
    counts: BTreeMap<T, u64>,
    total: u64,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Ord,
{
    /// Creates an empty frequency table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `value`.
    pub fn add(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Returns the number of observations of `value`, or 0 if it was never seen.
    #[must_use]
    pub fn count(&self, value: &T) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the most frequent value and its count.
    ///
    /// When several values share the highest count, the smallest of them is
    /// returned. Returns `None` for an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use randaudit_stats::frequency::FrequencyTable;
    /// let table = ["b", "a", "b", "a", "c"].into_iter().collect::<FrequencyTable<_>>();
    /// assert_eq!(table.most_common(), Some((&"a", 2)));
    /// ```
    #[must_use]
    pub fn most_common(&self) -> Option<(&T, u64)> {
        let mut best: Option<(&T, u64)> = None;
        for (value, &count) in &self.counts {
            // strict comparison keeps the first (smallest) value on ties
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best
    }
}

impl<T> FrequencyTable<T> {
    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct values observed.
    #[must_use]
    pub fn num_unique(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates over `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> + '_ {
        self.counts.iter().map(|(value, &count)| (value, count))
    }

    /// Iterates over the distinct values in ascending order.
    pub fn values(&self) -> btree_map::Keys<'_, T, u64> {
        self.counts.keys()
    }
}

impl<T> FromIterator<T> for FrequencyTable<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut table = Self::new();
        for value in iter {
            table.add(value);
        }
        table
    }
}
