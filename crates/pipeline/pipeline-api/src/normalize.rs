//! Normalize step

use pipeline_spi::{FeatureMatrix, PipelineError, PipelineStep, Result};
use serde::{Deserialize, Serialize};

/// Normalize each column to the [0, 1] range seen during fit.
///
/// A constant column maps to 0.5.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeStep {
    min: Vec<f64>,
    max: Vec<f64>,
    fitted: bool,
}

impl NormalizeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    fn check_fitted(&self, data: &FeatureMatrix) -> Result<()> {
        if !self.fitted {
            return Err(PipelineError::NotFitted(self.name().to_string()));
        }
        if self.max.len() != self.min.len() {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} max values", self.min.len()),
                got: self.max.len().to_string(),
            });
        }
        if data.cols() != self.min.len() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.min.len(),
                got: data.cols(),
            });
        }
        Ok(())
    }
}

impl PipelineStep for NormalizeStep {
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()> {
        if data.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit normalize on empty data".to_string(),
            ));
        }
        let mut min = vec![f64::INFINITY; data.cols()];
        let mut max = vec![f64::NEG_INFINITY; data.cols()];
        for row in data.iter_rows() {
            for (j, &x) in row.iter().enumerate() {
                min[j] = min[j].min(x);
                max[j] = max[j].max(x);
            }
        }
        self.min = min;
        self.max = max;
        self.fitted = true;
        Ok(())
    }

    fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_fitted(data)?;
        Ok(data.map_columns(|j, x| {
            let range = self.max[j] - self.min[j];
            if range == 0.0 {
                0.5
            } else {
                (x - self.min[j]) / range
            }
        }))
    }

    fn inverse_transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_fitted(data)?;
        Ok(data.map_columns(|j, x| x * (self.max[j] - self.min[j]) + self.min[j]))
    }

    fn name(&self) -> &str {
        "normalize"
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn n_features_in(&self) -> Option<usize> {
        self.fitted.then_some(self.min.len())
    }
}
