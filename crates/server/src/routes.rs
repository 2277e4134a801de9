//! API route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use auth_core::IssuedToken;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::payload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<f64>,
}

/// `POST /login`: exchange credentials for a bearer token.
///
/// A body that does not carry string `username` and `password` fields is
/// treated as a failed login.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IssuedToken>, ApiError> {
    let credentials = body
        .ok()
        .and_then(|Json(value)| payload::unwrap_payload(value).ok())
        .and_then(|record| {
            let username = record.get("username")?.as_str()?.to_string();
            let password = record.get("password")?.as_str()?.to_string();
            Some((username, password))
        });
    let Some((username, password)) = credentials else {
        debug!("login body without string credentials");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    let token = state.auth.login(&username, &password)?;
    Ok(Json(token))
}

/// `POST /predict`: authenticate, validate and score one or more records.
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    state.auth.authorize(header)?;

    let Json(body) =
        body.map_err(|e| ApiError::BadRequest(format!("Invalid payload: {}", e.body_text())))?;
    let records = payload::normalize(body)?;
    let predictions = state.model.predict(&records)?;
    debug!(records = records.len(), "served prediction");
    Ok(Json(PredictResponse { predictions }))
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - is the model loaded and which contract does it serve?
pub async fn readiness(State(state): State<AppState>) -> Json<Value> {
    let model = &state.model;
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "model": model.tag().to_string(),
        "features": model.features(),
        "metrics": model.metadata().metrics,
    }))
}
