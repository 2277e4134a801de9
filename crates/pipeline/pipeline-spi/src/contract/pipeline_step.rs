//! Transform step trait definition.

use crate::error::Result;
use crate::model::FeatureMatrix;

/// A fitted-or-unfitted transformation applied to every row of a feature matrix.
///
/// Steps learn their parameters in [`fit`](PipelineStep::fit) and must not
/// change them in [`transform`](PipelineStep::transform), so a fitted step can
/// be shared read-only across threads.
pub trait PipelineStep: Send + Sync {
    /// Learn parameters from the training matrix.
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()>;

    /// Apply the learned transformation.
    fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix>;

    /// Undo the learned transformation.
    fn inverse_transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix>;

    /// Fit on `data` and return its transformed copy.
    fn fit_transform(&mut self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Name of this step
    fn name(&self) -> &str;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;

    /// Number of columns seen during `fit`, if fitted.
    fn n_features_in(&self) -> Option<usize>;
}
