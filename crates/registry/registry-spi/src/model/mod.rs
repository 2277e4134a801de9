//! Registry models.

mod metadata;
mod model_tag;

pub use metadata::{ModelInfo, ModelMetadata, StoredModel};
pub use model_tag::{ModelTag, LATEST};
