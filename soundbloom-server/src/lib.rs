//! soundbloom-server library - catalog service for the ambient mixer
//!
//! Serves the sound catalog and the audio files it points at. All mixing
//! state lives in the client.

use axum::Router;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use soundbloom_common::catalog::SOUNDS_URL_PREFIX;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory holding one sub-directory per sound category
    pub sounds_root: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(sounds_root: impl Into<PathBuf>) -> Self {
        Self {
            sounds_root: sounds_root.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let audio_files = ServeDir::new(&state.sounds_root);

    Router::new()
        .route("/api/sounds", get(api::get_sounds))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .nest_service(SOUNDS_URL_PREFIX, audio_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
