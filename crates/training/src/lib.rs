//! Training
//!
//! Loads a prepared split, fits the regression pipeline on the training
//! partition, scores it on the test partition and stores it with the
//! metadata the server validates requests against.

mod config;
mod error;
mod trainer;

pub use config::{ScalerKind, TrainConfig, DEFAULT_MODEL_NAME};
pub use error::{Result, TrainingError};
pub use trainer::{train, train_and_register, TrainedModel, TrainingReport};
