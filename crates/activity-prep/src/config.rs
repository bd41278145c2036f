use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Number of sensor channels per timestep (x, y, z).
pub const DEFAULT_CHANNELS: usize = 3;

/// Configuration for a single preparation run.
///
/// Every field has a default, so a JSON config only needs to name the values
/// it overrides.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PrepareConfig {
    /// Segmented sensor array (`.npy`)
    pub data_path: PathBuf,
    /// Label table (`.csv`), one row per window
    pub labels_path: PathBuf,
    /// Header of the label column
    pub label_column: String,
    /// Share of samples held out for testing, in (0, 1)
    pub test_fraction: f64,
    /// Timesteps per window
    pub window_size: usize,
    /// Sensor channels per timestep
    pub channels: usize,
    /// Seed for the stratified shuffle
    pub seed: u64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("../data/segmented_data.npy"),
            labels_path: PathBuf::from("../data/segmented_labels.csv"),
            label_column: "activity".to_string(),
            test_fraction: 0.2,
            window_size: 100,
            channels: DEFAULT_CHANNELS,
            seed: 42,
        }
    }
}

impl PrepareConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(data_path: P, labels_path: Q) -> Self {
        Self::default().with_paths(data_path, labels_path)
    }

    /// Load a config from a JSON file. Fields absent from the file keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| PrepError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PrepareConfig = serde_json::from_str(&json)?;
        Ok(config)
    }

    pub fn with_paths<P: Into<PathBuf>, Q: Into<PathBuf>>(
        mut self,
        data_path: P,
        labels_path: Q,
    ) -> Self {
        self.data_path = data_path.into();
        self.labels_path = labels_path.into();
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the numeric settings. Called before any file is touched.
    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PrepError::InvalidConfig(format!(
                "test_fraction must be strictly between 0 and 1, got {}",
                self.test_fraction
            )));
        }
        if self.window_size == 0 {
            return Err(PrepError::InvalidConfig(
                "window_size must be a positive integer".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(PrepError::InvalidConfig(
                "channels must be a positive integer".to_string(),
            ));
        }
        if self.label_column.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "label_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_segmentation_output() {
        let cfg = PrepareConfig::default();
        assert_eq!(cfg.window_size, 100);
        assert_eq!(cfg.channels, 3);
        assert_eq!(cfg.label_column, "activity");
        assert!((cfg.test_fraction - 0.2).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let cfg = PrepareConfig::default().with_test_fraction(bad);
            assert!(
                matches!(cfg.validate(), Err(PrepError::InvalidConfig(_))),
                "fraction {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn rejects_zero_window() {
        let cfg = PrepareConfig::default().with_window_size(0);
        assert!(matches!(cfg.validate(), Err(PrepError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PrepareConfig = serde_json::from_str(r#"{"window_size": 50}"#).unwrap();
        assert_eq!(cfg.window_size, 50);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.label_column, "activity");
    }
}
