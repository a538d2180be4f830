//! Serves stored certificate files.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use folio_core::error::{AppError, ErrorKind};
use folio_storage::content_type_for;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /certifications/{name}
pub async fn serve_certification_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let not_found = || AppError::not_found("file not found");

    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']) {
        return Err(not_found().into());
    }

    let bytes = state
        .certification_service
        .read_file(&name)
        .await
        .map_err(|e| match e.kind {
            ErrorKind::NotFound | ErrorKind::Validation => not_found(),
            _ => e,
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&name)),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    ))
}
