//! Fit, evaluate, register.

use std::path::Path;

use data_facade::{load_split, TrainTestSplit};
use pipeline_facade::{metrics, EvaluationMetrics, RegressionPipeline};
use registry_spi::{ModelInfo, ModelStore, ModelTag};
use serde::Serialize;
use tracing::info;

use crate::config::TrainConfig;
use crate::error::Result;

/// A fitted pipeline and its held-out scores.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub pipeline: RegressionPipeline,
    pub metrics: EvaluationMetrics,
    pub features: Vec<String>,
    pub target: String,
}

/// Outcome of [`train_and_register`].
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub tag: String,
    pub metrics: EvaluationMetrics,
    pub features: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fit on the training partition and score on the test partition.
pub fn train(split: &TrainTestSplit, config: &TrainConfig) -> Result<TrainedModel> {
    let mut pipeline = config.build_pipeline();
    pipeline.fit(&split.x_train, &split.y_train)?;

    let predicted = pipeline.predict(&split.x_test)?;
    let metrics = metrics::evaluate(&split.y_test, &predicted)?;
    info!(
        r2 = metrics.r2,
        mae = metrics.mae,
        rmse = metrics.rmse,
        stages = ?pipeline.stage_names(),
        "trained pipeline"
    );

    Ok(TrainedModel {
        pipeline,
        metrics,
        features: split.feature_names.clone(),
        target: split.target_name.clone(),
    })
}

/// Load the split in `split_dir`, train, and save the result to `store`.
pub fn train_and_register<S: ModelStore>(
    split_dir: &Path,
    store: &S,
    config: &TrainConfig,
) -> Result<TrainingReport> {
    let split = load_split(split_dir)?;
    let trained = train(&split, config)?;

    let info = ModelInfo {
        features: trained.features.clone(),
        target: Some(trained.target.clone()),
        metrics: Some(trained.metrics),
    };
    let tag: ModelTag = store.save(&config.model_name, &trained.pipeline, &info)?;
    info!(model = %tag, "registered model");

    Ok(TrainingReport {
        tag: tag.to_string(),
        metrics: trained.metrics,
        features: trained.features,
        train_rows: split.train_len(),
        test_rows: split.test_len(),
    })
}
