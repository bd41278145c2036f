//! Class frequency helpers used for run summaries and split checks.
use std::collections::BTreeMap;

/// Count occurrences of each label, ordered by label.
pub fn class_counts<'a, L, I>(labels: I) -> BTreeMap<L, usize>
where
    L: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Relative frequency of each label. Empty input yields an empty map.
pub fn class_distribution<'a, L, I>(labels: I) -> BTreeMap<L, f64>
where
    L: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let counts = class_counts(labels);
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total as f64))
        .collect()
}

/// Largest absolute difference in class frequency between two label sets.
///
/// Classes missing from one side count as frequency zero there.
pub fn max_distribution_gap<'a, L, I, J>(a: I, b: J) -> f64
where
    L: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a L>,
    J: IntoIterator<Item = &'a L>,
{
    let da = class_distribution(a);
    let db = class_distribution(b);
    da.keys()
        .chain(db.keys())
        .map(|k| (da.get(k).copied().unwrap_or(0.0) - db.get(k).copied().unwrap_or(0.0)).abs())
        .fold(0.0, f64::max)
}
