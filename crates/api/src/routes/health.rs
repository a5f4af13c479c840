use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a SteamGridDB key is configured.
    pub sgdb_configured: bool,
    /// Whether a record store URL is configured.
    pub record_store_configured: bool,
}

/// GET /health -- returns service health and configured dependencies.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sgdb_configured = state.sgdb.has_api_key();
    let status = if sgdb_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sgdb_configured,
        record_store_configured: state.store.is_some(),
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
