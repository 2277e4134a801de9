//! Pipeline Facade
//!
//! Single import point for building, fitting and evaluating the regression
//! pipeline.

// Re-export everything from pipeline-api
pub use pipeline_api::*;

// Re-export prelude for convenience
pub use pipeline_api::prelude;
