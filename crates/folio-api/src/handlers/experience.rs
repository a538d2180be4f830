//! Experience handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use folio_entity::Experience;

use crate::dto::request::{CreateExperienceRequest, UpdateExperienceRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// GET /api/v1/experiences
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Experience>>>, ApiError> {
    let experiences = state.experience_service.get_all().await?;
    Ok(Json(ApiResponse::ok(experiences)))
}

/// GET /api/v1/experiences/{id}
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Experience>>, ApiError> {
    let id = parse_id(&id)?;
    let experience = state.experience_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(experience)))
}

/// POST /api/v1/experiences
pub async fn create_experience(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateExperienceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Experience>>), ApiError> {
    let experience = state.experience_service.create(req.into_entity()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(experience, "experience created")),
    ))
}

/// PATCH /api/v1/experiences/{id}
pub async fn update_experience(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateExperienceRequest>,
) -> Result<Json<ApiResponse<Experience>>, ApiError> {
    let id = parse_id(&id)?;
    let experience = state
        .experience_service
        .update(id, req.into_entity()?)
        .await?;
    Ok(Json(ApiResponse::with_message(experience, "experience updated")))
}

/// DELETE /api/v1/experiences/{id}
pub async fn delete_experience(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id)?;
    state.experience_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("experience deleted"))))
}
