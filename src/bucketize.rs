//! Reduction of long-tailed frequency tables into display buckets.
//!
//! Entries are sorted by key and cut into contiguous groups. Group sizes are
//! `n / g` repeated `g` times, followed by one group holding `n % g` keys when
//! `n > g`. When `n < g` the quotient is zero and every key becomes its own
//! group. Note that `n / g` is the size of each group, not the group count.

use std::fmt::Display;

/// Ordered label -> count pairs ready for a chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketedMapping {
    entries: Vec<(String, u64)>,
}

impl BucketedMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `label`; an existing label keeps its position and takes the new value.
    pub fn insert(&mut self, label: String, value: u64) {
        if let Some(existing) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            existing.1 = value;
        } else {
            self.entries.push((label, value));
        }
    }

    /// Keep only the first bucket
    #[must_use]
    pub fn headline(mut self) -> Self {
        self.entries.truncate(1);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl FromIterator<(String, u64)> for BucketedMapping {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (label, value) in iter {
            mapping.insert(label, value);
        }
        mapping
    }
}

/// Sizes of the consecutive groups for `len` sorted keys.
#[must_use]
pub fn partition_sizes(len: usize, group_size: usize) -> Vec<usize> {
    let exact = len / group_size;
    let rest = if len > group_size { len % group_size } else { 0 };

    let mut sizes = vec![exact; group_size];
    if rest != 0 {
        sizes.push(rest);
    }

    if exact == 0 {
        return vec![1; len];
    }
    sizes
}

/// Bucketize `(key, count)` entries into at most `group_size + 1` groups.
///
/// Panics if `group_size` is zero; configuration validation rules that out.
pub fn bucketize<'a, K, I>(entries: I, group_size: usize) -> BucketedMapping
where
    K: Ord + Display + 'a,
    I: IntoIterator<Item = (&'a K, u64)>,
{
    let mut sorted: Vec<(&K, u64)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut mapping = BucketedMapping::new();
    let mut rest = sorted.as_slice();

    for size in partition_sizes(sorted.len(), group_size) {
        let (group, tail) = rest.split_at(size.min(rest.len()));
        rest = tail;

        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let label = if first.0 == last.0 {
            first.0.to_string()
        } else {
            format!("<{}", last.0)
        };
        mapping.insert(label, group.iter().map(|(_, v)| v).sum());
    }

    mapping
}
