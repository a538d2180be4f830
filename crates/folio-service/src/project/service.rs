//! Project CRUD.

use std::sync::Arc;

use tracing::info;

use folio_core::error::AppError;
use folio_database::repositories::ProjectStore;
use folio_entity::{CreateProject, Project, UpdateProject};

use crate::experience::service::check_date_range;

/// Handles portfolio projects.
#[derive(Clone)]
pub struct ProjectService {
    /// Project repository.
    repo: Arc<ProjectStore>,
}

impl std::fmt::Debug for ProjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectService").finish_non_exhaustive()
    }
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(repo: Arc<ProjectStore>) -> Self {
        Self { repo }
    }

    /// Lists projects, most recent start first.
    pub async fn get_all(&self) -> Result<Vec<Project>, AppError> {
        self.repo.find_all().await
    }

    /// Gets one project.
    pub async fn get_by_id(&self, id: i64) -> Result<Project, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("project not found"))
    }

    /// Creates a project.
    pub async fn create(&self, data: CreateProject) -> Result<Project, AppError> {
        check_date_range(data.start_date, data.end_date)?;

        let project = self.repo.create(&data).await?;
        info!(project_id = project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Applies a partial update.
    pub async fn update(&self, id: i64, patch: UpdateProject) -> Result<Project, AppError> {
        let existing = self.get_by_id(id).await?;
        check_date_range(
            patch.start_date.unwrap_or(existing.start_date),
            patch.end_date.unwrap_or(existing.end_date),
        )?;

        let project = self.repo.update(id, &patch).await.map_err(|e| {
            if e.is_not_found() {
                AppError::not_found("project not found")
            } else {
                e
            }
        })?;
        info!(project_id = id, "Project updated");
        Ok(project)
    }

    /// Deletes a project.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("project not found"));
        }
        info!(project_id = id, "Project deleted");
        Ok(())
    }
}
