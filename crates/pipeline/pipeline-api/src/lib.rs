//! Pipeline stage implementations
//!
//! This crate provides the concrete stages of the regression pipeline:
//!
//! - [`StandardizeStep`]: Standardize to zero mean, unit variance
//! - [`NormalizeStep`]: Normalize data to [0, 1] range
//! - [`LinearRegression`]: Ordinary least squares estimator
//!
//! and the persistable [`RegressionPipeline`] built from them.

mod linear_regression;
mod normalize;
mod stage;
mod standardize;

// Re-export from core
pub use pipeline_core::{metrics, Pipeline, PipelineError, Result};

// Re-export traits and shared types from SPI
pub use pipeline_spi::{Estimator, EvaluationMetrics, FeatureMatrix, PipelineStep};

// Re-export implementations
pub use linear_regression::LinearRegression;
pub use normalize::NormalizeStep;
pub use stage::{standard_pipeline, Model, RegressionPipeline, Step};
pub use standardize::StandardizeStep;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Estimator, FeatureMatrix, PipelineStep};
    pub use crate::{LinearRegression, NormalizeStep, StandardizeStep};
    pub use crate::{standard_pipeline, Model, RegressionPipeline, Step};
    pub use crate::{Pipeline, PipelineError, Result};
}
