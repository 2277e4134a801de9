//! Dataset Service Provider Interface
//!
//! Defines the raw-table source contract, the train/test split model and the
//! errors raised while cleaning and splitting a tabular dataset.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::TableSource;
pub use error::{DatasetError, Result};
pub use model::{is_missing, PrepareSummary, RawTable, TrainTestSplit};
pub use pipeline_spi::FeatureMatrix;
