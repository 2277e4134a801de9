//! Standardize step

use pipeline_spi::{FeatureMatrix, PipelineError, PipelineStep, Result};
use serde::{Deserialize, Serialize};

/// Standardize each column to zero mean and unit variance.
///
/// Uses the population standard deviation. A constant column keeps a scale
/// of 1.0, so it is centred but never divided by zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardizeStep {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
    fitted: bool,
}

impl StandardizeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }

    fn check_fitted(&self, data: &FeatureMatrix) -> Result<()> {
        if !self.fitted {
            return Err(PipelineError::NotFitted(self.name().to_string()));
        }
        if self.std_dev.len() != self.mean.len() {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} std_dev values", self.mean.len()),
                got: self.std_dev.len().to_string(),
            });
        }
        if data.cols() != self.mean.len() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.mean.len(),
                got: data.cols(),
            });
        }
        Ok(())
    }
}

impl PipelineStep for StandardizeStep {
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()> {
        if data.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit standardize on empty data".to_string(),
            ));
        }
        let n = data.rows() as f64;
        let mean = data.column_means();
        let mut var = vec![0.0; data.cols()];
        for row in data.iter_rows() {
            for ((acc, x), m) in var.iter_mut().zip(row).zip(&mean) {
                *acc += (x - m).powi(2);
            }
        }
        self.std_dev = var
            .into_iter()
            .map(|v| {
                let s = (v / n).sqrt();
                if s == 0.0 {
                    1.0
                } else {
                    s
                }
            })
            .collect();
        self.mean = mean;
        self.fitted = true;
        Ok(())
    }

    fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_fitted(data)?;
        Ok(data.map_columns(|j, x| (x - self.mean[j]) / self.std_dev[j]))
    }

    fn inverse_transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_fitted(data)?;
        Ok(data.map_columns(|j, x| x * self.std_dev[j] + self.mean[j]))
    }

    fn name(&self) -> &str {
        "standardize"
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn n_features_in(&self) -> Option<usize> {
        self.fitted.then_some(self.mean.len())
    }
}
