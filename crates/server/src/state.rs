//! Shared application state.

use std::sync::Arc;

use auth_core::{AuthService, StaticCredentials, StaticSecrets, TokenService};
use pipeline_facade::{FeatureMatrix, RegressionPipeline};
use registry_core::{FsModelStore, ModelMetadata, ModelStore, ModelTag};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ApiError, StartupError};
use crate::payload::{self, Record};

/// The model being served: a fitted pipeline and the feature list it expects.
#[derive(Debug)]
pub struct ServingModel {
    tag: ModelTag,
    metadata: ModelMetadata,
    pipeline: RegressionPipeline,
}

impl ServingModel {
    /// Check that the metadata can drive request validation for this pipeline.
    pub fn new(
        tag: ModelTag,
        metadata: ModelMetadata,
        pipeline: RegressionPipeline,
    ) -> Result<Self, StartupError> {
        if metadata.features.is_empty() {
            return Err(StartupError::Misconfigured(format!(
                "model {} metadata does not contain a feature list",
                tag
            )));
        }
        if !pipeline.is_fitted() {
            return Err(StartupError::Misconfigured(format!(
                "model {} pipeline is not fitted",
                tag
            )));
        }
        if let Some(width) = pipeline.n_features_in() {
            if width != metadata.features.len() {
                return Err(StartupError::Misconfigured(format!(
                    "model {} lists {} features but its pipeline expects {}",
                    tag,
                    metadata.features.len(),
                    width
                )));
            }
        }
        // Score an all-zero record so inconsistent stored parameters fail here.
        let sample = FeatureMatrix::zeros(1, metadata.features.len());
        match pipeline.predict(&sample) {
            Ok(preds) if preds.iter().all(|p| p.is_finite()) => {}
            Ok(_) => {
                return Err(StartupError::Misconfigured(format!(
                    "model {} produces non-finite predictions",
                    tag
                )))
            }
            Err(e) => {
                return Err(StartupError::Misconfigured(format!(
                    "model {} cannot score a record: {}",
                    tag, e
                )))
            }
        }
        Ok(Self {
            tag,
            metadata,
            pipeline,
        })
    }

    /// Resolve `tag` in `store` and load it.
    pub fn load<S: ModelStore>(store: &S, tag: &ModelTag) -> Result<Self, StartupError> {
        let resolved = store.resolve(tag)?;
        let stored = store.load::<RegressionPipeline>(&resolved)?;
        Self::new(resolved, stored.metadata, stored.pipeline)
    }

    pub fn tag(&self) -> &ModelTag {
        &self.tag
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn features(&self) -> &[String] {
        &self.metadata.features
    }

    /// Validate, reorder and predict. One value per record, in record order.
    pub fn predict(&self, records: &[Record]) -> Result<Vec<f64>, ApiError> {
        let matrix = payload::to_matrix(records, self.features())?;
        let predictions = self
            .pipeline
            .predict(&matrix)
            .map_err(|e| ApiError::Internal(format!("prediction failed: {}", e)))?;
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(ApiError::Internal(
                "model produced a non-finite prediction".to_string(),
            ));
        }
        Ok(predictions)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ServingModel>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(model: ServingModel, auth: AuthService) -> Self {
        Self {
            model: Arc::new(model),
            auth: Arc::new(auth),
        }
    }

    /// Load the configured model and build the auth services.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        for setting in config.insecure_defaults() {
            warn!(setting, "using built-in development default; set it before deploying");
        }

        let tag = ModelTag::parse(&config.model_tag)?;
        let store = FsModelStore::new(&config.model_store_dir);
        let model = ServingModel::load(&store, &tag)?;
        info!(
            model = %model.tag(),
            features = model.features().len(),
            "loaded model"
        );

        Ok(Self::new(model, auth_service(config)))
    }
}

fn auth_service(config: &ServerConfig) -> AuthService {
    let secrets = StaticSecrets::new(config.jwt_secret.clone())
        .with_previous(config.jwt_previous_secrets.iter().cloned());
    AuthService::new(
        Arc::new(StaticCredentials::new(
            config.api_user.clone(),
            config.api_pass.clone(),
        )),
        TokenService::new(Arc::new(secrets), config.jwt_exp_seconds),
    )
}
