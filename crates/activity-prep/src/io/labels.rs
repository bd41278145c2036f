//! CSV reader for the per-window label table.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array1;

use crate::error::{PrepError, Result};

/// Read one column of a headered CSV as strings, one entry per row.
///
/// The header is matched exactly after trimming surrounding whitespace.
/// Values are trimmed too, so `" sitting "` and `"sitting"` are the same class.
pub fn read_label_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Array1<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PrepError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let csv_err = |source: csv::Error| PrepError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let Some(label_idx) = headers.iter().position(|h| h.trim() == column) else {
        return Err(PrepError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    };

    let mut labels = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let value = record.get(label_idx).unwrap_or("").trim().to_string();
        labels.push(value);
    }

    Ok(Array1::from_vec(labels))
}
