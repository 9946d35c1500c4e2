use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use candy_core::types::Timestamp;
use candy_db::store::StorageBackend;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `OK` or `ERROR`.
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// `connected`, `disconnected`, or `offline`.
    pub database: &'static str,
    /// Active storage backend.
    pub backend: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health -- reports storage connectivity.
///
/// Responds 500 with the same shape plus `error` when the store cannot be
/// reached.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.store.backend();

    match state.store.ping().await {
        Ok(()) => {
            let database = match backend {
                StorageBackend::Offline => "offline",
                StorageBackend::Postgres | StorageBackend::Memory => "connected",
            };
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "OK",
                    timestamp: chrono::Utc::now(),
                    database,
                    backend: backend.as_str(),
                    version: env!("CARGO_PKG_VERSION"),
                    error: None,
                }),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, %backend, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "ERROR",
                    timestamp: chrono::Utc::now(),
                    database: "disconnected",
                    backend: backend.as_str(),
                    version: env!("CARGO_PKG_VERSION"),
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
