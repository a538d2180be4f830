//! Certification handlers: list, get, batch upload, delete.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::info;

use folio_core::error::AppError;
use folio_core::types::Deadline;
use folio_entity::Certification;
use folio_service::{BatchStatus, BatchSummary, CertificationMetadata, UploadJob};

use crate::dto::request::UploadQuery;
use crate::dto::response::{ApiResponse, BatchUploadResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// Multipart field carrying the certificate files.
const FILES_FIELD: &str = "files";

/// GET /api/v1/upload-certificates
pub async fn list_certifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Certification>>>, ApiError> {
    let certifications = state.certification_service.get_all().await?;
    Ok(Json(ApiResponse::ok(certifications)))
}

/// GET /api/v1/upload-certificates/{id}
pub async fn get_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Certification>>, ApiError> {
    let id = parse_id(&id)?;
    let certification = state.certification_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(certification)))
}

/// POST /api/v1/upload-certificates?workers=N
///
/// Responds 200 when every file was stored, 207 when some were, and 500
/// when none were. The body always lists each file's outcome. New batches
/// are refused with 503 once shutdown has begun.
pub async fn upload_certificates(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    if state.shutdown.is_cancelled() {
        return Err(AppError::service_unavailable("server is shutting down").into());
    }

    let upload = &state.config.upload;
    let workers = parse_workers(query.workers.as_deref(), upload.max_workers)?;

    let jobs = read_upload_form(multipart).await?;
    if jobs.is_empty() {
        return Err(AppError::validation("no files uploaded").into());
    }

    let base_url = public_base_url(&headers, &upload.public_path);
    let deadline = Deadline::child_of(&state.shutdown, upload.timeout_for(jobs.len()));

    info!(
        user_id = auth.id,
        files = jobs.len(),
        workers,
        "Received certificate upload"
    );

    let outcomes = state
        .certification_service
        .store_batch(jobs, workers, &base_url, &deadline)
        .await;

    let status = match BatchSummary::from_outcomes(&outcomes).status() {
        BatchStatus::AllSucceeded => StatusCode::OK,
        BatchStatus::Partial => StatusCode::MULTI_STATUS,
        BatchStatus::AllFailed => StatusCode::INTERNAL_SERVER_ERROR,
    };

    // Same envelope for every status; the counts carry the verdict.
    let body = ApiResponse::with_message(
        BatchUploadResponse::from_outcomes(outcomes),
        "Files upload completed",
    );

    Ok((status, Json(body)).into_response())
}

/// DELETE /api/v1/upload-certificates/{id}
pub async fn delete_certification(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id)?;
    state.certification_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "certification deleted",
    ))))
}

/// Parses the `workers` query value; absent or empty means the default (0).
fn parse_workers(raw: Option<&str>, max: usize) -> Result<usize, AppError> {
    let invalid = || AppError::validation(format!("workers must be between 0 and {max}"));
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => {
            let workers = value.parse::<usize>().map_err(|_| invalid())?;
            if workers > max {
                return Err(invalid());
            }
            Ok(workers)
        }
    }
}

/// Public URL prefix for stored files, from the request's host and scheme.
fn public_base_url(headers: &HeaderMap, public_path: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}{public_path}")
}

/// Reads every `files` part plus the batch metadata fields.
async fn read_upload_form(mut multipart: Multipart) -> Result<Vec<UploadJob>, AppError> {
    let mut jobs = Vec::new();
    let mut metadata = CertificationMetadata::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == FILES_FIELD {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
            jobs.push(UploadJob::new(original_name, content_type, data));
            continue;
        }

        let slot = match name.as_str() {
            "title" => &mut metadata.title,
            "issuer" => &mut metadata.issuer,
            "issue_date" => &mut metadata.issue_date,
            "expiry_date" => &mut metadata.expiry_date,
            "credential_id" => &mut metadata.credential_id,
            "credential_url" => &mut metadata.credential_url,
            "description" => &mut metadata.description,
            _ => continue,
        };
        let text = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read field {name}: {e}")))?;
        *slot = Some(text);
    }

    Ok(jobs
        .into_iter()
        .map(|job| job.with_metadata(metadata.clone()))
        .collect())
}
