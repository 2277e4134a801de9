//! Integration tests for registry-core
//!
//! A fitted regression pipeline stored and reloaded through the filesystem store.

use pipeline_api::{standard_pipeline, FeatureMatrix, RegressionPipeline};
use registry_core::{EvaluationMetrics, FsModelStore, ModelInfo, ModelStore, ModelTag};
use tempfile::TempDir;

fn fitted() -> (RegressionPipeline, FeatureMatrix) {
    let rows: Vec<Vec<f64>> = (0..10)
        .map(|i| vec![300.0 + i as f64 * 2.0, 7.5 + (i % 4) as f64 * 0.5])
        .collect();
    let y: Vec<f64> = rows.iter().map(|r| 0.002 * r[0] + 0.1 * r[1] - 0.6).collect();
    let x = FeatureMatrix::from_rows(&rows).unwrap();
    let mut pipeline = standard_pipeline();
    pipeline.fit(&x, &y).unwrap();
    (pipeline, x)
}

#[test]
fn test_pipeline_round_trip_through_store() {
    let dir = TempDir::new().unwrap();
    let store = FsModelStore::new(dir.path());
    let (pipeline, x) = fitted();
    let info = ModelInfo {
        features: vec!["GRE Score".into(), "CGPA".into()],
        target: Some("Chance of Admit".into()),
        metrics: Some(EvaluationMetrics::new(0.99, 0.01, 0.02)),
    };

    let tag = store.save("admissions_lr", &pipeline, &info).unwrap();
    let stored = store
        .load::<RegressionPipeline>(&ModelTag::parse("admissions_lr").unwrap())
        .unwrap();

    assert_eq!(stored.metadata.version, tag.version().unwrap());
    assert_eq!(stored.metadata.features, info.features);
    assert_eq!(stored.metadata.metrics, info.metrics);
    assert_eq!(stored.pipeline.n_features_in(), Some(2));
    assert_eq!(
        stored.pipeline.predict(&x).unwrap(),
        pipeline.predict(&x).unwrap()
    );
}

#[test]
fn test_metadata_file_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let store = FsModelStore::new(dir.path());
    let (pipeline, _) = fitted();
    let tag = store
        .save(
            "admissions_lr",
            &pipeline,
            &ModelInfo {
                features: vec!["a".into(), "b".into()],
                ..ModelInfo::default()
            },
        )
        .unwrap();

    let path = dir
        .path()
        .join("admissions_lr")
        .join(tag.version().unwrap())
        .join(registry_core::METADATA_FILE);
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["features"], serde_json::json!(["a", "b"]));
    assert_eq!(value["name"], "admissions_lr");
}
