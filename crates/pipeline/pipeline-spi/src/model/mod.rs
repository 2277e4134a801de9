//! Data types exchanged between pipeline stages.

mod feature_matrix;
mod metrics;

pub use feature_matrix::FeatureMatrix;
pub use metrics::EvaluationMetrics;
