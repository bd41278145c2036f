//! Label encoding for downstream classifiers.
//!
//! Activity names are mapped to dense class indices (sorted by name) and
//! optionally expanded to one-hot rows.
use ndarray::{Array1, Array2};

use crate::error::{PrepError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct labels.
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut classes: Vec<String> = labels.into_iter().cloned().collect();
        classes.sort_unstable();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    /// Map labels to class indices. Labels not seen by [`LabelEncoder::fit`] are an error.
    pub fn transform<'a, I>(&self, labels: I) -> Result<Array1<usize>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        labels
            .into_iter()
            .map(|l| {
                self.index_of(l)
                    .ok_or_else(|| PrepError::InvalidLabel(l.clone()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }

    pub fn inverse_transform(&self, indices: &Array1<usize>) -> Result<Array1<String>> {
        indices
            .iter()
            .map(|&i| {
                self.classes
                    .get(i)
                    .cloned()
                    .ok_or_else(|| PrepError::InvalidLabel(format!("class index {}", i)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }
}

/// One-hot encode class indices into a `[n, num_classes]` matrix.
pub fn to_categorical(indices: &Array1<usize>, num_classes: usize) -> Result<Array2<f32>> {
    let mut out = Array2::<f32>::zeros((indices.len(), num_classes));
    for (row, &class) in indices.iter().enumerate() {
        if class >= num_classes {
            return Err(PrepError::InvalidLabel(format!(
                "class index {} out of range for {} classes",
                class, num_classes
            )));
        }
        out[[row, class]] = 1.0;
    }
    Ok(out)
}
