//! Pipeline Service Provider Interface
//!
//! Defines the traits and shared types for tabular fit/transform/predict
//! pipelines: transform steps, the terminal estimator, the dense feature
//! matrix they exchange, and the evaluation metrics summary.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Estimator, PipelineStep};
pub use error::{PipelineError, Result};
pub use model::{EvaluationMetrics, FeatureMatrix};
