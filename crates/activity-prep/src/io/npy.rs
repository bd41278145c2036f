//! NumPy `.npy` reader for the segmented sensor array.
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array1, ArrayD};
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement};

use crate::error::{PrepError, Result};

/// Element types the sensor array can be loaded as.
///
/// A file stored with a different dtype is converted only when every value
/// converts exactly; otherwise the read fails.
pub trait SensorElement: ReadableElement + Copy + Debug + Send + Sync + 'static {
    /// NumPy name of the dtype, used in error messages.
    const DTYPE: &'static str;

    fn from_f64(v: f64) -> Option<Self>;

    fn from_i64(v: i64) -> Option<Self>;
}

impl SensorElement for f32 {
    const DTYPE: &'static str = "float32";

    fn from_f64(v: f64) -> Option<Self> {
        let n = v as f32;
        (n as f64 == v || v.is_nan()).then_some(n)
    }

    fn from_i64(v: i64) -> Option<Self> {
        let n = v as f32;
        (n as i128 == v as i128).then_some(n)
    }
}

impl SensorElement for f64 {
    const DTYPE: &'static str = "float64";

    fn from_f64(v: f64) -> Option<Self> {
        Some(v)
    }

    fn from_i64(v: i64) -> Option<Self> {
        let n = v as f64;
        (n as i128 == v as i128).then_some(n)
    }
}

impl SensorElement for i64 {
    const DTYPE: &'static str = "int64";

    fn from_f64(v: f64) -> Option<Self> {
        // 2^63 is exact in f64, so the upper bound is strict
        let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
        (v.fract() == 0.0 && in_range).then(|| v as i64)
    }

    fn from_i64(v: i64) -> Option<Self> {
        Some(v)
    }
}

impl SensorElement for i32 {
    const DTYPE: &'static str = "int32";

    fn from_f64(v: f64) -> Option<Self> {
        let in_range = v >= i32::MIN as f64 && v <= i32::MAX as f64;
        (v.fract() == 0.0 && in_range).then(|| v as i32)
    }

    fn from_i64(v: i64) -> Option<Self> {
        i32::try_from(v).ok()
    }
}

/// Read an `.npy` array of any rank and flatten it in row-major order.
///
/// An array stored as `A` is returned unchanged. Float and integer arrays of
/// another dtype are converted to `A` only if no value changes; a value that
/// `A` cannot hold exactly is a [`PrepError::Npy`] naming both dtypes.
pub fn read_flat_array<A: SensorElement, P: AsRef<Path>>(path: P) -> Result<Array1<A>> {
    let path = path.as_ref();

    if let Some(arr) = try_read::<A>(path)? {
        log::debug!("Read {} array of shape {:?} from {:?}", A::DTYPE, arr.shape(), path);
        return Ok(arr.iter().copied().collect());
    }

    if let Some(arr) = try_read::<f64>(path)? {
        return convert(path, &arr, "float64", A::from_f64);
    }
    if let Some(arr) = try_read::<f32>(path)? {
        return convert(path, &arr, "float32", |v| A::from_f64(v as f64));
    }
    if let Some(arr) = try_read::<i64>(path)? {
        return convert(path, &arr, "int64", A::from_i64);
    }
    if let Some(arr) = try_read::<u64>(path)? {
        return convert(path, &arr, "uint64", |v| i64::try_from(v).ok().and_then(A::from_i64));
    }
    if let Some(arr) = try_read::<i32>(path)? {
        return convert(path, &arr, "int32", |v| A::from_i64(v as i64));
    }
    if let Some(arr) = try_read::<u32>(path)? {
        return convert(path, &arr, "uint32", |v| A::from_i64(v as i64));
    }
    if let Some(arr) = try_read::<i16>(path)? {
        return convert(path, &arr, "int16", |v| A::from_i64(v as i64));
    }
    if let Some(arr) = try_read::<u16>(path)? {
        return convert(path, &arr, "uint16", |v| A::from_i64(v as i64));
    }
    if let Some(arr) = try_read::<i8>(path)? {
        return convert(path, &arr, "int8", |v| A::from_i64(v as i64));
    }
    if let Some(arr) = try_read::<u8>(path)? {
        return convert(path, &arr, "uint8", |v| A::from_i64(v as i64));
    }

    Err(PrepError::Npy {
        path: path.to_path_buf(),
        message: format!(
            "unsupported dtype, expected a float or integer array convertible to {}",
            A::DTYPE
        ),
    })
}

/// `Ok(None)` when the file holds a different dtype than `T`.
fn try_read<T: ReadableElement>(path: &Path) -> Result<Option<ArrayD<T>>> {
    match ArrayD::<T>::read_npy(open(path)?) {
        Ok(arr) => Ok(Some(arr)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(e) => Err(npy_error(path, e)),
    }
}

fn convert<T, A, F>(path: &Path, arr: &ArrayD<T>, source: &str, cast: F) -> Result<Array1<A>>
where
    T: Copy + Debug,
    A: SensorElement,
    F: Fn(T) -> Option<A>,
{
    log::debug!(
        "Converting {} array of shape {:?} from {:?} to {}",
        source,
        arr.shape(),
        path,
        A::DTYPE
    );
    arr.iter()
        .map(|&v| {
            cast(v).ok_or_else(|| PrepError::Npy {
                path: path.to_path_buf(),
                message: format!(
                    "{} value {:?} is not exactly representable as {}",
                    source,
                    v,
                    A::DTYPE
                ),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Array1::from_vec)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| PrepError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn npy_error(path: &Path, err: ReadNpyError) -> PrepError {
    match err {
        ReadNpyError::Io(source) => PrepError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => PrepError::Npy {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}
