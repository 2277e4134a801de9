//! Model Registry Service Provider Interface
//!
//! A model store keeps fitted pipelines under `name:version` tags together
//! with the metadata the serving side validates requests against.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ModelStore;
pub use error::{RegistryError, Result};
pub use model::{ModelInfo, ModelMetadata, ModelTag, StoredModel, LATEST};
pub use pipeline_spi::EvaluationMetrics;
