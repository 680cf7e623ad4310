//! End-to-end tests chaining the label and one-hot encoders through a store.

use labelstore::{EncodingError, EncodingStore, LabelEncoder, OneHotEncoder, StoreOptions};
use ndarray::array;

#[test]
fn test_label_then_one_hot() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let encoder = LabelEncoder::at(tmp.path().join("cells.json"));

    let (codes, dict) = encoder.encode_rows::<i64, _>(&["lung", "skin", "lung", "blood"])?;
    assert_eq!(codes, vec![0, 1, 0, 2]);

    let one_hot = OneHotEncoder::for_dictionary(&dict).encode_rows::<f32, _>(&codes)?;
    assert_eq!(
        one_hot,
        array![
            [1.0f32, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0]
        ]
    );

    let decoded = OneHotEncoder::for_dictionary(&dict).decode(&one_hot)?;
    let labels = encoder.decode(&decoded)?;
    assert_eq!(labels, vec!["lung", "skin", "lung", "blood"]);

    Ok(())
}

#[test]
fn test_encoders_share_store_by_path() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("shared.json");

    let first = LabelEncoder::at(&path);
    let second = LabelEncoder::new(
        EncodingStore::new(&path).with_options(StoreOptions::default().with_pretty(false)),
    );

    first.encode::<u32, _>(&["a", "b"])?;
    let (codes, dict) = second.encode::<u32, _>(&["c", "a"])?;

    assert_eq!(codes, vec![2, 0]);
    assert_eq!(first.store().list_labels()?, vec!["a", "b", "c"]);
    assert_eq!(dict.len(), 3);

    Ok(())
}

#[test]
fn test_spec_example_extension() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let store = EncodingStore::new(tmp.path().join("abc.json"));

    store.resolve_or_create(&["A", "B", "C"])?;
    let dict = store.resolve_or_create(&["C", "D"])?;

    let pairs: Vec<_> = dict.iter().collect();
    assert_eq!(pairs, vec![(0, "A"), (1, "B"), (2, "C"), (3, "D")]);

    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(store.path())?)?;
    assert_eq!(raw["D"], 3);
    assert_eq!(raw["3"], "D");

    Ok(())
}

#[test]
fn test_reads_store_written_by_hand() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("legacy.json");
    std::fs::write(
        &path,
        "{\n    \"0\": \"A\",\n    \"A\": 0,\n    \"1\": \"B\",\n    \"B\": 1\n}",
    )?;

    let encoder = LabelEncoder::at(&path);
    let (codes, _) = encoder.encode::<i32, _>(&["B", "Z"])?;
    assert_eq!(codes, vec![1, 2]);

    Ok(())
}

#[test]
fn test_corrupt_store_blocks_encoding() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, r#"{"A": 0}"#)?;

    let err = LabelEncoder::at(&path)
        .encode::<i32, _>(&["A"])
        .unwrap_err();
    assert!(matches!(err, EncodingError::StoreCorrupt { .. }));

    Ok(())
}
