//! Seeded stratified train/test partitioning.
//!
//! The test partition holds `ceil(test_fraction * n)` samples. Each class
//! receives a share of the test partition proportional to its size, with
//! largest-remainder rounding so the shares add up exactly. Members of each
//! class are drawn by a shuffle seeded from the configured seed, so the same
//! labels, fraction and seed always yield the same partition.
use std::collections::BTreeMap;

use ndarray::{Array1, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{PrepError, Result};

/// Positions of the original samples assigned to each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// The four containers handed to model training, with features of element type `A`.
#[derive(Debug, Clone)]
pub struct TrainTestSplit<A = f32> {
    pub x_train: Array3<A>,
    pub x_test: Array3<A>,
    pub y_train: Array1<String>,
    pub y_test: Array1<String>,
    /// Original sample positions of `x_train` / `y_train`, row for row.
    pub train_indices: Vec<usize>,
    /// Original sample positions of `x_test` / `y_test`, row for row.
    pub test_indices: Vec<usize>,
}

impl<A: Clone> TrainTestSplit<A> {
    /// Gather rows of `x` and `y` according to `indices`.
    pub fn from_indices(x: &Array3<A>, y: &Array1<String>, indices: SplitIndices) -> Self {
        TrainTestSplit {
            x_train: x.select(Axis(0), &indices.train),
            x_test: x.select(Axis(0), &indices.test),
            y_train: y.select(Axis(0), &indices.train),
            y_test: y.select(Axis(0), &indices.test),
            train_indices: indices.train,
            test_indices: indices.test,
        }
    }

    /// `(x_train, x_test, y_train, y_test)`.
    pub fn into_parts(self) -> (Array3<A>, Array3<A>, Array1<String>, Array1<String>) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }

    pub fn n_train(&self) -> usize {
        self.x_train.len_of(Axis(0))
    }

    pub fn n_test(&self) -> usize {
        self.x_test.len_of(Axis(0))
    }
}

/// Number of samples that go to the test partition.
pub fn test_size(n_samples: usize, test_fraction: f64) -> usize {
    // absorb float noise such as 0.1 * 30 = 3.0000000000000004
    let raw = test_fraction * n_samples as f64;
    let rounded = raw.round();
    if (raw - rounded).abs() < 1e-9 {
        rounded as usize
    } else {
        raw.ceil() as usize
    }
}

/// Split sample positions `0..labels.len()` into stratified train and test sets.
///
/// Fails with [`PrepError::Stratify`] when either partition would be empty,
/// when a class has fewer than two members, or when either partition is
/// smaller than the number of classes.
pub fn stratified_split_indices<L: Ord>(
    labels: &[L],
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices> {
    let n_samples = labels.len();
    let n_test = test_size(n_samples, test_fraction);
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(PrepError::Stratify(format!(
            "test_fraction {} on {} samples gives {} train and {} test samples",
            test_fraction, n_samples, n_train, n_test
        )));
    }

    let mut classes: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        classes.entry(label).or_default().push(i);
    }
    let mut members: Vec<Vec<usize>> = classes.into_values().collect();

    if let Some(smallest) = members.iter().map(Vec::len).min() {
        if smallest < 2 {
            return Err(PrepError::Stratify(
                "the least populated class has only 1 member, at least 2 are required".to_string(),
            ));
        }
    }
    let n_classes = members.len();
    if n_test < n_classes || n_train < n_classes {
        return Err(PrepError::Stratify(format!(
            "{} train and {} test samples cannot hold all {} classes",
            n_train, n_test, n_classes
        )));
    }

    let counts: Vec<usize> = members.iter().map(Vec::len).collect();
    let test_per_class = allocate(&counts, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for (idx, n_class_test) in members.iter_mut().zip(&test_per_class) {
        idx.shuffle(&mut rng);
        let (class_test, class_train) = idx.split_at(*n_class_test);
        test.extend_from_slice(class_test);
        train.extend_from_slice(class_train);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}

/// Distribute `total` draws over classes proportionally to `counts`.
///
/// Each class gets the floor of its exact share; the leftover draws go to
/// the largest fractional remainders, ties broken by larger class, then by
/// class order.
fn allocate(counts: &[usize], total: usize) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let mut shares: Vec<usize> = counts.iter().map(|&c| c * total / n).collect();
    let mut leftover = total - shares.iter().sum::<usize>();

    // remainder numerators, compared in integer space
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = counts[a] * total % n;
        let rb = counts[b] * total % n;
        rb.cmp(&ra)
            .then(counts[b].cmp(&counts[a]))
            .then(a.cmp(&b))
    });

    for &class in order.iter().cycle() {
        if leftover == 0 {
            break;
        }
        if shares[class] < counts[class] {
            shares[class] += 1;
            leftover -= 1;
        }
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_exact_for_even_shares() {
        assert_eq!(allocate(&[600, 400], 200), vec![120, 80]);
    }

    #[test]
    fn allocation_sums_to_total() {
        let counts = [7, 5, 3];
        let shares = allocate(&counts, 4);
        assert_eq!(shares.iter().sum::<usize>(), 4);
        // exact shares 1.87, 1.33, 0.8
        assert_eq!(shares, vec![2, 1, 1]);
    }

    #[test]
    fn test_size_rounds_up() {
        assert_eq!(test_size(1000, 0.2), 200);
        assert_eq!(test_size(30, 0.1), 3);
        assert_eq!(test_size(11, 0.2), 3);
    }

    #[test]
    fn singleton_class_is_rejected() {
        let y = vec!["a", "a", "a", "b"];
        assert!(matches!(
            stratified_split_indices(&y, 0.5, 42),
            Err(PrepError::Stratify(_))
        ));
    }

    #[test]
    fn too_small_test_partition_is_rejected() {
        let y = vec!["a", "a", "b", "b", "c", "c", "a", "b", "c", "a"];
        // ceil(0.1 * 10) = 1 test sample for 3 classes
        assert!(matches!(
            stratified_split_indices(&y, 0.1, 42),
            Err(PrepError::Stratify(_))
        ));
    }

    #[test]
    fn different_seeds_pick_different_samples() {
        let y: Vec<u8> = (0..100).map(|i| (i % 2) as u8).collect();
        let a = stratified_split_indices(&y, 0.3, 1).unwrap();
        let b = stratified_split_indices(&y, 0.3, 2).unwrap();
        assert_ne!(a.test, b.test);
    }
}
