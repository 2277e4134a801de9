//! Persistable stage kinds
//!
//! A fitted pipeline is stored as JSON, so its stages are closed enums
//! tagged by `kind` rather than trait objects. Adding a step kind means
//! adding a variant here; the serving side only ever calls `predict`.

use pipeline_core::Pipeline;
use pipeline_spi::{Estimator, FeatureMatrix, PipelineStep, Result};
use serde::{Deserialize, Serialize};

use crate::linear_regression::LinearRegression;
use crate::normalize::NormalizeStep;
use crate::standardize::StandardizeStep;

/// Any transform step that can be saved in a model store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Standardize(StandardizeStep),
    Normalize(NormalizeStep),
}

/// Any estimator that can be saved in a model store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    LinearRegression(LinearRegression),
}

/// The pipeline type written to and read from the model store.
pub type RegressionPipeline = Pipeline<Step, Model>;

/// Unfitted standard scaler followed by an OLS linear regression.
pub fn standard_pipeline() -> RegressionPipeline {
    Pipeline::new(Model::LinearRegression(LinearRegression::new()))
        .with_step(Step::Standardize(StandardizeStep::new()))
}

impl Step {
    fn inner(&self) -> &dyn PipelineStep {
        match self {
            Step::Standardize(s) => s,
            Step::Normalize(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PipelineStep {
        match self {
            Step::Standardize(s) => s,
            Step::Normalize(s) => s,
        }
    }
}

impl PipelineStep for Step {
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()> {
        self.inner_mut().fit(data)
    }

    fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.inner().transform(data)
    }

    fn inverse_transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.inner().inverse_transform(data)
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn is_fitted(&self) -> bool {
        self.inner().is_fitted()
    }

    fn n_features_in(&self) -> Option<usize> {
        self.inner().n_features_in()
    }
}

impl From<StandardizeStep> for Step {
    fn from(step: StandardizeStep) -> Self {
        Step::Standardize(step)
    }
}

impl From<NormalizeStep> for Step {
    fn from(step: NormalizeStep) -> Self {
        Step::Normalize(step)
    }
}

impl Estimator for Model {
    fn fit(&mut self, data: &FeatureMatrix, target: &[f64]) -> Result<()> {
        match self {
            Model::LinearRegression(m) => m.fit(data, target),
        }
    }

    fn predict(&self, data: &FeatureMatrix) -> Result<Vec<f64>> {
        match self {
            Model::LinearRegression(m) => m.predict(data),
        }
    }

    fn name(&self) -> &str {
        match self {
            Model::LinearRegression(m) => m.name(),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            Model::LinearRegression(m) => m.is_fitted(),
        }
    }

    fn n_features_in(&self) -> Option<usize> {
        match self {
            Model::LinearRegression(m) => m.n_features_in(),
        }
    }
}

impl From<LinearRegression> for Model {
    fn from(model: LinearRegression) -> Self {
        Model::LinearRegression(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_spi::PipelineError;

    fn training_data() -> (FeatureMatrix, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                let i = i as f64;
                vec![300.0 + 3.0 * i, 8.0 + (i * 0.7).cos()]
            })
            .collect();
        let target = rows
            .iter()
            .map(|r| 0.01 * r[0] + 0.05 * r[1] - 2.0)
            .collect();
        (FeatureMatrix::from_rows(&rows).unwrap(), target)
    }

    #[test]
    fn test_standard_pipeline_composition() {
        let pipeline = standard_pipeline();
        assert_eq!(
            pipeline.stage_names(),
            vec!["standardize", "linear_regression"]
        );
        assert!(!pipeline.is_fitted());
        assert_eq!(pipeline.n_features_in(), None);
    }

    #[test]
    fn test_standard_pipeline_fits_linear_target() {
        let (x, y) = training_data();
        let mut pipeline = standard_pipeline();
        pipeline.fit(&x, &y).unwrap();

        assert_eq!(pipeline.n_features_in(), Some(2));
        let preds = pipeline.predict(&x).unwrap();
        for (p, t) in preds.iter().zip(&y) {
            assert!((p - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_json_round_trip_keeps_predictions() {
        let (x, y) = training_data();
        let mut pipeline = standard_pipeline();
        pipeline.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&pipeline).unwrap();
        assert!(json.contains("\"kind\":\"standardize\""));
        assert!(json.contains("\"kind\":\"linear_regression\""));

        let restored: RegressionPipeline = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.predict(&x).unwrap(), pipeline.predict(&x).unwrap());
    }

    #[test]
    fn test_normalize_step_variant() {
        let (x, y) = training_data();
        let mut pipeline = RegressionPipeline::new(LinearRegression::new().into())
            .with_step(NormalizeStep::new().into());
        pipeline.fit(&x, &y).unwrap();
        assert_eq!(pipeline.stage_names()[0], "normalize");
        assert!(pipeline.predict(&x).is_ok());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"kind":"polynomial","degree":2}"#;
        assert!(serde_json::from_str::<Step>(json).is_err());
    }

    #[test]
    fn test_unfitted_pipeline_refuses_predict() {
        let (x, _) = training_data();
        assert!(matches!(
            standard_pipeline().predict(&x),
            Err(PipelineError::NotFitted(_))
        ));
    }
}
