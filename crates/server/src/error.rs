//! Request and startup errors.

use auth_core::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registry_core::RegistryError;
use serde::Serialize;
use thiserror::Error;

/// Per-request failure, rendered as `{error, status}` with the same HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Signing(msg) => ApiError::Internal(format!("could not issue token: {}", msg)),
            _ => ApiError::Unauthorized("Unauthorized".to_string()),
        }
    }
}

/// Failure before the server starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration {name}: {reason}")]
    Config { name: String, reason: String },

    #[error("Could not load model: {0}")]
    Registry(#[from] RegistryError),

    /// Loaded model cannot serve requests
    #[error("Runtime misconfiguration: {0}")]
    Misconfigured(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
