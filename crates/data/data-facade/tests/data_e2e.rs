//! End-to-end tests for dataset preparation
//!
//! Raw CSV on disk through cleaning, splitting, writing and reloading.

use std::fs;

use data_facade::{
    load_split, prepare, DatasetError, PrepareConfig, X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE,
    Y_TRAIN_FILE,
};
use tempfile::TempDir;

const HEADER: &str =
    "Serial No.,GRE Score,TOEFL Score,University Rating,SOP,LOR ,CGPA,Research,Chance of Admit ";

fn raw_csv(rows: usize) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for i in 0..rows {
        let gre = 290 + (i * 7) % 50;
        let toefl = 92 + (i * 3) % 28;
        let rating = 1 + i % 5;
        let sop = 1.0 + (i % 9) as f64 * 0.5;
        let lor = 1.5 + (i % 8) as f64 * 0.5;
        let cgpa = 6.8 + (i % 30) as f64 * 0.1;
        let research = i % 2;
        let chance = 0.4 + (i % 50) as f64 * 0.01;
        text.push_str(&format!(
            "{},{},{},{},{},{},{:.2},{},{:.2}\n",
            i + 1,
            gre,
            toefl,
            rating,
            sop,
            lor,
            cgpa,
            research,
            chance
        ));
    }
    text
}

#[test]
fn test_prepare_writes_reloadable_split() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("admission.csv");
    fs::write(&raw, raw_csv(50)).unwrap();
    let out = dir.path().join("processed");

    let summary = prepare(&raw, &out, &PrepareConfig::default()).unwrap();
    assert_eq!(summary.rows_read, 50);
    assert_eq!(summary.test_rows, 10);
    assert_eq!(summary.train_rows, 40);

    for file in [X_TRAIN_FILE, X_TEST_FILE, Y_TRAIN_FILE, Y_TEST_FILE] {
        assert!(out.join(file).is_file());
    }

    let split = load_split(&out).unwrap();
    assert_eq!(
        split.feature_names,
        vec![
            "GRE Score",
            "TOEFL Score",
            "University Rating",
            "SOP",
            "LOR",
            "CGPA",
            "Research"
        ]
    );
    assert_eq!(split.target_name, "Chance of Admit");
    assert_eq!(split.x_train.shape(), (40, 7));
    assert_eq!(split.x_test.shape(), (10, 7));
}

#[test]
fn test_prepare_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("admission.csv");
    fs::write(&raw, raw_csv(30)).unwrap();

    prepare(&raw, &dir.path().join("a"), &PrepareConfig::default()).unwrap();
    prepare(&raw, &dir.path().join("b"), &PrepareConfig::default()).unwrap();

    for file in [X_TRAIN_FILE, X_TEST_FILE, Y_TRAIN_FILE, Y_TEST_FILE] {
        let a = fs::read_to_string(dir.path().join("a").join(file)).unwrap();
        let b = fs::read_to_string(dir.path().join("b").join(file)).unwrap();
        assert_eq!(a, b, "{} differs between runs", file);
    }
}

#[test]
fn test_prepare_without_target_fails() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("admission.csv");
    fs::write(&raw, "GRE Score,CGPA\n320,9.1\n310,8.2\n").unwrap();

    let result = prepare(&raw, &dir.path().join("out"), &PrepareConfig::default());
    assert!(matches!(result, Err(DatasetError::MissingColumn { .. })));
    assert!(!dir.path().join("out").exists());
}
