//! # server
//!
//! Authenticated HTTP prediction service for the admissions regression model.
//!
//! - `POST /login` exchanges credentials for a bearer token
//! - `POST /predict` scores one record or a batch of `instances`
//! - `GET /health/live`, `GET /health/ready` and `GET /health` probes

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, StartupError};
pub use state::{AppState, ServingModel};

/// Build the router with middleware.
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        // Legacy health endpoint
        .route("/health", get(routes::liveness))
        // API endpoints
        .route("/login", post(routes::login))
        .route("/predict", post(routes::predict))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Load the model named in `config` and serve until the process stops.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .map_err(|_| StartupError::Config {
            name: "HOST".to_string(),
            reason: format!("'{}' is not a valid bind address", config.bind_addr()),
        })?;

    tracing::info!(
        "admissions server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
