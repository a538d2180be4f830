//! Experience repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{CreateExperience, Experience, UpdateExperience};

use super::db_error;

/// Repository for work experience records.
#[derive(Debug, Clone)]
pub struct ExperienceRepository {
    pool: SqlitePool,
}

impl ExperienceRepository {
    /// Create a new experience repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Experience, CreateExperience, UpdateExperience> for ExperienceRepository {
    async fn create(&self, data: &CreateExperience) -> AppResult<Experience> {
        let now = Utc::now();
        sqlx::query_as::<_, Experience>(
            "INSERT INTO experiences (title, company, url, location, employment_type, \
             start_date, end_date, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.company)
        .bind(&data.url)
        .bind(&data.location)
        .bind(data.employment_type)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create experience", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Experience>> {
        sqlx::query_as::<_, Experience>(
            "SELECT * FROM experiences ORDER BY start_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list experiences", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Experience>> {
        sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find experience", e))
    }

    async fn update(&self, id: i64, patch: &UpdateExperience) -> AppResult<Experience> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE experiences SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(title) = &patch.title {
            query.push(", title = ").push_bind(title.clone());
        }
        if let Some(company) = &patch.company {
            query.push(", company = ").push_bind(company.clone());
        }
        if let Some(url) = &patch.url {
            query.push(", url = ").push_bind(url.clone());
        }
        if let Some(location) = &patch.location {
            query.push(", location = ").push_bind(location.clone());
        }
        if let Some(employment_type) = patch.employment_type {
            query.push(", employment_type = ").push_bind(employment_type);
        }
        if let Some(start_date) = patch.start_date {
            query.push(", start_date = ").push_bind(start_date);
        }
        if let Some(end_date) = patch.end_date {
            query.push(", end_date = ").push_bind(end_date);
        }
        if let Some(description) = &patch.description {
            query.push(", description = ").push_bind(description.clone());
        }

        query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        query
            .build_query_as::<Experience>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update experience", e))?
            .ok_or_else(|| AppError::not_found(format!("Experience {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete experience", e))?;

        Ok(result.rows_affected() > 0)
    }
}
