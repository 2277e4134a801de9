//! Model store trait definition.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::model::{ModelInfo, ModelTag, StoredModel};

/// Versioned storage for fitted pipelines and their metadata.
///
/// Saved entries are immutable; every `save` creates a new version and makes
/// it the one `name:latest` resolves to.
pub trait ModelStore: Send + Sync {
    /// Persist `pipeline` under a fresh version of `name`.
    fn save<P: Serialize>(&self, name: &str, pipeline: &P, info: &ModelInfo) -> Result<ModelTag>;

    /// Load the entry `tag` resolves to.
    fn load<P: DeserializeOwned>(&self, tag: &ModelTag) -> Result<StoredModel<P>>;

    /// Every stored version of `name`, oldest first.
    fn versions(&self, name: &str) -> Result<Vec<String>>;

    /// Every model name in the store.
    fn names(&self) -> Result<Vec<String>>;

    /// Replace `latest` (or a missing version) with a concrete version.
    fn resolve(&self, tag: &ModelTag) -> Result<ModelTag>;
}
