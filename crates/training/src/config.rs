//! Training configuration.

use pipeline_facade::{LinearRegression, NormalizeStep, RegressionPipeline, StandardizeStep};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_NAME: &str = "admissions_lr";

/// Feature scaling applied before the regression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    /// Zero mean, unit variance
    #[default]
    Standard,
    /// Per-column [0, 1]
    MinMax,
    /// Raw features
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Name the fitted pipeline is stored under
    pub model_name: String,
    pub scaler: ScalerKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            scaler: ScalerKind::Standard,
        }
    }
}

impl TrainConfig {
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_scaler(mut self, scaler: ScalerKind) -> Self {
        self.scaler = scaler;
        self
    }

    /// Unfitted pipeline for this configuration.
    pub fn build_pipeline(&self) -> RegressionPipeline {
        let pipeline = RegressionPipeline::new(LinearRegression::new().into());
        match self.scaler {
            ScalerKind::Standard => pipeline.with_step(StandardizeStep::new().into()),
            ScalerKind::MinMax => pipeline.with_step(NormalizeStep::new().into()),
            ScalerKind::None => pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_scaler() {
        let config = TrainConfig::default();
        assert_eq!(config.model_name, "admissions_lr");
        assert_eq!(
            config.build_pipeline().stage_names(),
            vec!["standardize", "linear_regression"]
        );
    }

    #[test]
    fn test_scaler_choice() {
        let minmax = TrainConfig::new("m").with_scaler(ScalerKind::MinMax);
        assert_eq!(minmax.build_pipeline().stage_names()[0], "normalize");

        let raw = TrainConfig::new("m").with_scaler(ScalerKind::None);
        assert_eq!(raw.build_pipeline().stage_names(), vec!["linear_regression"]);
    }
}
