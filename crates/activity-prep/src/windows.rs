//! Reshaping of the raw sensor buffer into fixed-width windows.
use ndarray::{Array1, Array3};

use crate::error::{PrepError, Result};

/// Reshape a flat buffer into `[samples, window_size, channels]`.
///
/// The sample count is derived from the buffer length. A length that is zero
/// or not an exact multiple of `window_size * channels` is a
/// [`PrepError::ShapeMismatch`]; nothing is truncated or padded.
pub fn to_windows<A>(flat: Array1<A>, window_size: usize, channels: usize) -> Result<Array3<A>> {
    let len = flat.len();
    let mismatch = || PrepError::ShapeMismatch {
        len,
        window_size,
        channels,
    };

    let per_sample = window_size.checked_mul(channels).ok_or_else(mismatch)?;
    if per_sample == 0 || len == 0 || len % per_sample != 0 {
        return Err(mismatch());
    }

    let n_samples = len / per_sample;
    Array3::from_shape_vec((n_samples, window_size, channels), flat.into_raw_vec())
        .map_err(|_| mismatch())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_sample_count() {
        let flat = Array1::from_iter((0..24).map(|v| v as f32));
        let x = to_windows(flat, 4, 3).unwrap();
        assert_eq!(x.shape(), &[2, 4, 3]);
        // second window, first timestep, third channel
        assert_eq!(x[[1, 0, 2]], 14.0);
    }

    #[test]
    fn indivisible_length_fails() {
        let flat = Array1::from_elem(25, 0.0f32);
        match to_windows(flat, 4, 3) {
            Err(PrepError::ShapeMismatch { len, window_size, channels }) => {
                assert_eq!((len, window_size, channels), (25, 4, 3));
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn empty_buffer_fails() {
        assert!(matches!(
            to_windows(Array1::<f32>::from_vec(vec![]), 100, 3),
            Err(PrepError::ShapeMismatch { .. })
        ));
    }
}
