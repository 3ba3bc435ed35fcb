//! Daily set download endpoint

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::AppState;

/// GET /dailyset
///
/// Serves the persisted daily set bytes as a download. 404 when nothing has
/// ever been generated; 500 when the persisted artifact cannot be read.
/// Never blocks on generation - a stale-but-persisted set is still served.
pub async fn download_daily_set(State(state): State<AppState>) -> Response {
    match state.store.read_artifact() {
        Ok(Some(bytes)) => {
            let disposition = format!("attachment; filename=\"{}\"", state.artifact_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "File not found."})),
        )
            .into_response(),
        Err(e) => {
            error!("Error sending daily set: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to send file."})),
            )
                .into_response()
        }
    }
}
