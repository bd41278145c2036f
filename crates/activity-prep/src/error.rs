//! Error type shared by every stage of data preparation.
//!
//! ```text
//! PrepError
//! ├── InvalidConfig            (raised before any I/O)
//! ├── Read / Npy / Csv / Json  (loading)
//! ├── ShapeMismatch / MissingColumn / LengthMismatch / InvalidLabel  (schema)
//! └── Stratify                 (partitioning)
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Convenient `Result` alias used across the crate.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Everything that can go wrong while loading, windowing or splitting.
///
/// No variant carries partial results; a failed run produces nothing.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input file could not be opened or read.
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The array file was readable but is not a usable `.npy` array.
    #[error("Invalid NPY array in {path:?}: {message}")]
    Npy { path: PathBuf, message: String },

    /// A label table record could not be parsed.
    #[error("Malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The config file is not valid JSON for `PrepareConfig`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The raw element count cannot be split into whole windows.
    #[error(
        "Cannot reshape {len} values into windows of {window_size} timesteps x {channels} channels \
         ({len} is not a non-zero multiple of {})",
        .window_size * .channels
    )]
    ShapeMismatch {
        len: usize,
        window_size: usize,
        channels: usize,
    },

    /// The label table has no column with the expected name.
    #[error("Missing label column '{column}' in {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    /// Label count and sample count disagree.
    #[error("Found {labels} labels for {samples} samples")]
    LengthMismatch { labels: usize, samples: usize },

    /// A label was not seen when the encoder was fitted.
    #[error("Unknown label '{0}'")]
    InvalidLabel(String),

    /// The class layout does not permit a stratified split.
    #[error("Stratified split failed: {0}")]
    Stratify(String),
}
