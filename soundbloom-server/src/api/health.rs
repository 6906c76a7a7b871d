//! Liveness check
//!
//! Reports the process as up regardless of the sounds directory, and says
//! separately whether that directory is currently reachable, so a monitor
//! can tell "server down" from "catalog will fail".

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process answers
    pub status: String,
    pub module: String,
    pub version: String,
    /// Whether the sounds root is an existing directory right now
    pub sounds_dir_available: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sounds_dir_available = tokio::fs::metadata(&state.sounds_root)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "soundbloom-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sounds_dir_available,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
