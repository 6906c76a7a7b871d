//! Sound catalog endpoint
//!
//! Every request rescans the sounds directory and returns a full snapshot.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use soundbloom_common::catalog::{load_catalog, SoundDefinition};

use crate::AppState;

/// Body returned for any catalog failure
pub const CATALOG_ERROR_MESSAGE: &str = "Failed to load sounds";

/// GET /api/sounds
///
/// The directory scan is blocking I/O and runs on the blocking pool.
pub async fn get_sounds(
    State(state): State<AppState>,
) -> Result<Json<Vec<SoundDefinition>>, CatalogError> {
    let root = state.sounds_root.clone();

    match tokio::task::spawn_blocking(move || load_catalog(&root)).await {
        Ok(Ok(catalog)) => Ok(Json(catalog)),
        Ok(Err(e)) => {
            error!("Error loading sounds: {}", e);
            Err(CatalogError)
        }
        Err(e) => {
            error!("Catalog scan task failed: {}", e);
            Err(CatalogError)
        }
    }
}

/// Catalog could not be produced; details are in the server log only
#[derive(Debug)]
pub struct CatalogError;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": CATALOG_ERROR_MESSAGE,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
