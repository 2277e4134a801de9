//! Pipeline contracts.

mod estimator;
mod pipeline_step;

pub use estimator::Estimator;
pub use pipeline_step::PipelineStep;
