mod common;

use approx::assert_relative_eq;
use tempfile::TempDir;

use caliper_core::error::StoreError;
use caliper_core::store::{self, MeasurementStore};
use common::measurement;

#[test]
fn test_save_writes_header_and_rows_in_order() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("m.csv"));
    store
        .save(&[
            measurement("Measurement 1", 10.0, 10.0, 13.0, 14.0),
            measurement("Second", 0.5, 1.25, 2.5, 1.25),
        ])
        .unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(
        contents,
        "Name,Start X,Start Y,End X,End Y,Length (px)\n\
         Measurement 1,10,10,13,14,5.0\n\
         Second,0.5,1.25,2.5,1.25,2.0\n"
    );
}

#[test]
fn test_save_replaces_previous_contents() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("m.csv"));
    store
        .save(&[
            measurement("a", 0.0, 0.0, 1.0, 0.0),
            measurement("b", 0.0, 0.0, 2.0, 0.0),
        ])
        .unwrap();
    store.save(&[measurement("c", 0.0, 0.0, 3.0, 0.0)]).unwrap();

    let records = store.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "c");
}

#[test]
fn test_empty_collection_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("m.csv"));
    store.save(&[]).unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents, "Name,Start X,Start Y,End X,End Y,Length (px)\n");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_round_trips_rows() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("m.csv"));
    let saved: Vec<_> = (0..5)
        .map(|i| measurement(&format!("Line {i}"), i as f64, 0.0, i as f64 + 0.1, 7.0))
        .collect();
    store.save(&saved).unwrap();

    let loaded: Vec<_> = store
        .load()
        .unwrap()
        .iter()
        .map(|r| r.to_measurement())
        .collect();
    assert_eq!(loaded.len(), saved.len());
    for (a, b) in saved.iter().zip(&loaded) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.start(), b.start());
        assert_eq!(a.end(), b.end());
        assert_relative_eq!(a.length(), b.length());
    }
}

#[test]
fn test_names_with_commas_are_quoted() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("m.csv"));
    store
        .save(&[measurement("Femur, left", 0.0, 0.0, 3.0, 4.0)])
        .unwrap();

    let contents = std::fs::read_to_string(store.path()).unwrap();
    assert!(contents.contains("\"Femur, left\",0,0,3,4,5.0"));
    assert_eq!(store.load().unwrap()[0].name, "Femur, left");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = MeasurementStore::new(dir.path().join("absent.csv"));
    assert!(matches!(store.load(), Err(StoreError::Read { .. })));
    assert!(store.load_or_empty().unwrap().is_empty());
}

#[test]
fn test_malformed_row_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "Name,Start X,Start Y,End X,End Y,Length (px)\nx,one,2,3,4,5\n",
    )
    .unwrap();

    let err = MeasurementStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
}

#[test]
fn test_blank_name_row_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.csv");
    std::fs::write(
        &path,
        "Name,Start X,Start Y,End X,End Y,Length (px)\nok,0,0,1,0,1.0\n  ,0,0,1,0,1.0\n",
    )
    .unwrap();

    let err = MeasurementStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidRow { row: 2, .. }));
}

#[test]
fn test_export_to_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no").join("such").join("dir.csv");
    let err = store::export(&[measurement("a", 0.0, 0.0, 1.0, 1.0)], &path).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }));
}
