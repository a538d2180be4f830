//! Project handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use folio_entity::Project;

use crate::dto::request::{CreateProjectRequest, UpdateProjectRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.project_service.get_all().await?)))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.project_service.get_by_id(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    let project = state.project_service.create(req.into_entity()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(project, "project created")),
    ))
}

/// PATCH /api/v1/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let id = parse_id(&id)?;
    let project = state.project_service.update(id, req.into_entity()?).await?;
    Ok(Json(ApiResponse::with_message(project, "project updated")))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.project_service.delete(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("project deleted"))))
}
