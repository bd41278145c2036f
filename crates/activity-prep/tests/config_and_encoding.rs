//! Integration tests for JSON configuration and label encoding of split output.

use std::fs;

use activity_prep::encoding::{to_categorical, LabelEncoder};
use activity_prep::{DataPreparer, PrepError, PrepareConfig};
use ndarray::{Array1, Array3, Axis};

// ---------------------------------------------------------------------------
// PrepareConfig from JSON
// ---------------------------------------------------------------------------

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prep.json");
    fs::write(
        &path,
        r#"{"data_path": "windows.npy", "test_fraction": 0.3, "seed": 7}"#,
    )
    .unwrap();

    let cfg = PrepareConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.data_path.to_str(), Some("windows.npy"));
    assert!((cfg.test_fraction - 0.3).abs() < 1e-12);
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.window_size, 100);
    assert_eq!(cfg.labels_path, PrepareConfig::default().labels_path);
}

#[test]
fn config_round_trips_json() {
    let cfg = PrepareConfig::default().with_window_size(64).with_seed(3);
    let json = serde_json::to_string(&cfg).unwrap();
    let back: PrepareConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn malformed_config_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prep.json");
    fs::write(&path, "{ window_size: ").unwrap();
    assert!(matches!(
        PrepareConfig::from_json_file(&path),
        Err(PrepError::Json(_))
    ));
}

#[test]
fn preparer_rejects_invalid_config() {
    let cfg = PrepareConfig::default().with_test_fraction(1.0);
    assert!(matches!(
        DataPreparer::new(cfg),
        Err(PrepError::InvalidConfig(_))
    ));
}

// ---------------------------------------------------------------------------
// Encoding split labels
// ---------------------------------------------------------------------------

#[test]
fn split_labels_encode_to_one_hot() {
    let n = 40;
    let x = Array3::<f32>::zeros((n, 5, 3));
    let y: Array1<String> = (0..n)
        .map(|i| ["walking", "sitting", "jogging", "standing"][i % 4].to_string())
        .collect();

    let preparer = DataPreparer::new(PrepareConfig::default().with_window_size(5)).unwrap();
    let split = preparer.split(&x, &y).unwrap();
    assert_eq!(split.n_test(), 8);
    assert_eq!(split.x_test.len_of(Axis(1)), 5);

    let encoder = LabelEncoder::fit(&y);
    assert_eq!(encoder.num_classes(), 4);

    let train_idx = encoder.transform(&split.y_train).unwrap();
    let one_hot = to_categorical(&train_idx, encoder.num_classes()).unwrap();
    assert_eq!(one_hot.shape(), &[32, 4]);
    // every class has 8 train rows
    for c in 0..4 {
        assert_eq!(one_hot.column(c).sum(), 8.0);
    }
}

#[test]
fn split_rejects_misaligned_labels() {
    let x = Array3::<f32>::zeros((10, 5, 3));
    let y: Array1<String> = (0..9).map(|i| format!("c{}", i % 2)).collect();
    let preparer = DataPreparer::new(PrepareConfig::default()).unwrap();
    assert!(matches!(
        preparer.split(&x, &y),
        Err(PrepError::LengthMismatch { labels: 9, samples: 10 })
    ));
}
