//! Training error types.

use data_facade::DatasetError;
use pipeline_facade::PipelineError;
use registry_spi::RegistryError;
use thiserror::Error;

/// Failures of any stage a training run passes through.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;
