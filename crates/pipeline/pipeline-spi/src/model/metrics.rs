//! Evaluation metrics summary.

use serde::{Deserialize, Serialize};

/// Regression metrics computed on a held-out split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Coefficient of determination
    pub r2: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
}

impl EvaluationMetrics {
    pub fn new(r2: f64, mae: f64, rmse: f64) -> Self {
        Self { r2, mae, rmse }
    }
}
