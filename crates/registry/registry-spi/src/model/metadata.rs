//! Stored model metadata.

use pipeline_spi::EvaluationMetrics;
use serde::{Deserialize, Serialize};

/// Caller-supplied part of the metadata, written alongside a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Input columns in the order the pipeline was fitted on
    pub features: Vec<String>,
    pub target: Option<String>,
    pub metrics: Option<EvaluationMetrics>,
}

/// Metadata of one stored version.
///
/// `features` is the request contract of the serving endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub version: String,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub metrics: Option<EvaluationMetrics>,
}

/// A loaded pipeline with its metadata.
#[derive(Debug, Clone)]
pub struct StoredModel<P> {
    pub metadata: ModelMetadata,
    pub pipeline: P,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_without_features_still_parses() {
        let json = r#"{"name":"m","version":"v1","created_at":"2024-01-01T00:00:00Z"}"#;
        let meta: ModelMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.features.is_empty());
        assert!(meta.metrics.is_none());
    }
}
