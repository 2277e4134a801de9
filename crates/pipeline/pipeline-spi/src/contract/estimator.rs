//! Estimator trait definition.

use crate::error::Result;
use crate::model::FeatureMatrix;

/// Terminal stage of a pipeline: learns a mapping from rows to a continuous target.
pub trait Estimator: Send + Sync {
    /// Fit the estimator on a feature matrix and its target vector.
    fn fit(&mut self, data: &FeatureMatrix, target: &[f64]) -> Result<()>;

    /// Predict one value per row, in row order.
    fn predict(&self, data: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Name of this estimator
    fn name(&self) -> &str;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;

    /// Number of columns seen during `fit`, if fitted.
    fn n_features_in(&self) -> Option<usize>;
}
