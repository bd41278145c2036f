//! Readers for the two input artifacts produced by the segmentation step.
pub mod labels;
pub mod npy;

pub use labels::read_label_column;
pub use npy::{read_flat_array, SensorElement};
