//! Load, window and split segmented sensor data.
use std::path::Path;

use ndarray::{Array1, Array3, Axis};

use crate::config::PrepareConfig;
use crate::error::{PrepError, Result};
use crate::io::{read_flat_array, read_label_column, SensorElement};
use crate::split::{stratified_split_indices, TrainTestSplit};
use crate::stats::class_counts;
use crate::windows::to_windows;

/// Runs one preparation pass for a validated [`PrepareConfig`].
#[derive(Debug, Clone)]
pub struct DataPreparer {
    config: PrepareConfig,
}

impl DataPreparer {
    /// Validate `config` up front; no file is opened here.
    pub fn new(config: PrepareConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PrepareConfig {
        &self.config
    }

    /// Read both inputs as `f32` windows with their labels, unsplit.
    pub fn load(&self) -> Result<(Array3<f32>, Array1<String>)> {
        self.load_as::<f32>()
    }

    /// Read both inputs with features of element type `A`, unsplit.
    ///
    /// Values the array file stores in another dtype must convert to `A`
    /// exactly, see [`read_flat_array`].
    pub fn load_as<A: SensorElement>(&self) -> Result<(Array3<A>, Array1<String>)> {
        let cfg = &self.config;

        let flat = read_flat_array::<A, _>(&cfg.data_path)?;
        let x = to_windows(flat, cfg.window_size, cfg.channels)?;
        let labels = read_label_column(&cfg.labels_path, &cfg.label_column)?;

        let n_samples = x.len_of(Axis(0));
        if labels.len() != n_samples {
            return Err(PrepError::LengthMismatch {
                labels: labels.len(),
                samples: n_samples,
            });
        }

        log::info!("X shape: {:?} ({})", x.shape(), A::DTYPE);
        log::info!("y shape: {:?}", labels.shape());
        Ok((x, labels))
    }

    /// Load both inputs as `f32` and split them into stratified train and test partitions.
    pub fn prepare(&self) -> Result<TrainTestSplit> {
        self.prepare_as::<f32>()
    }

    /// Like [`DataPreparer::prepare`], keeping features as element type `A`.
    pub fn prepare_as<A: SensorElement>(&self) -> Result<TrainTestSplit<A>> {
        let (x, y) = self.load_as::<A>()?;
        self.split(&x, &y)
    }

    /// Split already-loaded windows and labels.
    pub fn split<A: Clone>(&self, x: &Array3<A>, y: &Array1<String>) -> Result<TrainTestSplit<A>> {
        let n_samples = x.len_of(Axis(0));
        if y.len() != n_samples {
            return Err(PrepError::LengthMismatch {
                labels: y.len(),
                samples: n_samples,
            });
        }

        let labels = y.to_vec();
        let indices =
            stratified_split_indices(&labels, self.config.test_fraction, self.config.seed)?;
        let split = TrainTestSplit::from_indices(x, y, indices);

        log::info!(
            "Split {} samples into {} train / {} test (test_fraction={}, seed={})",
            n_samples,
            split.n_train(),
            split.n_test(),
            self.config.test_fraction,
            self.config.seed
        );
        let train_counts = class_counts(&split.y_train);
        let test_counts = class_counts(&split.y_test);
        for (label, n_train) in &train_counts {
            log::debug!(
                "class '{}': {} train, {} test",
                label,
                n_train,
                test_counts.get(label).copied().unwrap_or(0)
            );
        }

        Ok(split)
    }
}

/// Prepare the default dataset layout with the given paths, test fraction and window size.
///
/// Returns `(x_train, x_test, y_train, y_test)`.
pub fn prepare<P: AsRef<Path>, Q: AsRef<Path>>(
    data_path: P,
    labels_path: Q,
    test_fraction: f64,
    window_size: usize,
) -> Result<(Array3<f32>, Array3<f32>, Array1<String>, Array1<String>)> {
    let config = PrepareConfig::new(data_path.as_ref(), labels_path.as_ref())
        .with_test_fraction(test_fraction)
        .with_window_size(window_size);
    let split = DataPreparer::new(config)?.prepare()?;
    Ok(split.into_parts())
}
