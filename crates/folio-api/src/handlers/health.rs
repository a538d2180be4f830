//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health and GET /api/v1/health
///
/// Reports `ok` while the database and the object store answer; otherwise
/// `unavailable` with a 503.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.repositories.health_check().await;
    let storage = state.object_store.health_check().await;

    let healthy = matches!(database, Ok(true)) && matches!(storage, Ok(true));
    if !healthy {
        warn!(?database, ?storage, "Health check failed");
    }

    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
