//! Project repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{CreateProject, Project, UpdateProject};

use super::db_error;

/// Repository for portfolio projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Project, CreateProject, UpdateProject> for ProjectRepository {
    async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        let now = Utc::now();
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, description, url, technologies, start_date, end_date, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.url)
        .bind(Json(&data.technologies))
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create project", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY start_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list projects", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find project", e))
    }

    async fn update(&self, id: i64, patch: &UpdateProject) -> AppResult<Project> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE projects SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(name) = &patch.name {
            query.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &patch.description {
            query.push(", description = ").push_bind(description.clone());
        }
        if let Some(url) = &patch.url {
            query.push(", url = ").push_bind(url.clone());
        }
        if let Some(technologies) = &patch.technologies {
            query
                .push(", technologies = ")
                .push_bind(Json(technologies.clone()));
        }
        if let Some(start_date) = patch.start_date {
            query.push(", start_date = ").push_bind(start_date);
        }
        if let Some(end_date) = patch.end_date {
            query.push(", end_date = ").push_bind(end_date);
        }

        query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        query
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update project", e))?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete project", e))?;

        Ok(result.rows_affected() > 0)
    }
}
