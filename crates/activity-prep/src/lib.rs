//! activity-prep: data preparation for activity-recognition models.
//!
//! Loads a segmented 3-channel sensor array (`.npy`) and its label table
//! (`.csv`), reshapes the array into `[samples, window_size, 3]` windows and
//! produces a seeded, stratified train/test split. Label encoding helpers
//! turn the activity names into class indices or one-hot rows.
//!
//! ```no_run
//! use activity_prep::{DataPreparer, PrepareConfig};
//!
//! let config = PrepareConfig::new("data/segmented_data.npy", "data/segmented_labels.csv");
//! let split = DataPreparer::new(config)?.prepare()?;
//! println!("{} train / {} test windows", split.n_train(), split.n_test());
//! # Ok::<(), activity_prep::PrepError>(())
//! ```
pub mod config;
pub mod encoding;
pub mod error;
pub mod io;
pub mod preparer;
pub mod split;
pub mod stats;
pub mod windows;

pub use config::PrepareConfig;
pub use error::{PrepError, Result};
pub use io::SensorElement;
pub use preparer::{prepare, DataPreparer};
pub use split::TrainTestSplit;
