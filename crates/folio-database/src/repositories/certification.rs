//! Certification repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{Certification, CreateCertification, UpdateCertification};

use super::db_error;

/// Repository for certification metadata. Deletes are soft.
#[derive(Debug, Clone)]
pub struct CertificationRepository {
    pool: SqlitePool,
}

impl CertificationRepository {
    /// Create a new certification repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a record by id, including soft-deleted ones.
    pub async fn find_by_id_with_deleted(&self, id: i64) -> AppResult<Option<Certification>> {
        sqlx::query_as::<_, Certification>("SELECT * FROM certifications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find certification", e))
    }
}

#[async_trait]
impl Repository<Certification, CreateCertification, UpdateCertification>
    for CertificationRepository
{
    async fn create(&self, data: &CreateCertification) -> AppResult<Certification> {
        let now = Utc::now();
        sqlx::query_as::<_, Certification>(
            "INSERT INTO certifications (title, issuer, issue_date, expiry_date, credential_id, \
             credential_url, file_url, file_name, original_name, file_size, mime_type, \
             description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.issuer)
        .bind(data.issue_date)
        .bind(data.expiry_date)
        .bind(&data.credential_id)
        .bind(&data.credential_url)
        .bind(&data.file_url)
        .bind(&data.file_name)
        .bind(&data.original_name)
        .bind(data.file_size)
        .bind(&data.mime_type)
        .bind(&data.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create certification", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Certification>> {
        sqlx::query_as::<_, Certification>(
            "SELECT * FROM certifications WHERE deleted_at IS NULL \
             ORDER BY issue_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list certifications", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Certification>> {
        sqlx::query_as::<_, Certification>(
            "SELECT * FROM certifications WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find certification", e))
    }

    async fn update(&self, id: i64, patch: &UpdateCertification) -> AppResult<Certification> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE certifications SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(title) = &patch.title {
            query.push(", title = ").push_bind(title.clone());
        }
        if let Some(issuer) = &patch.issuer {
            query.push(", issuer = ").push_bind(issuer.clone());
        }
        if let Some(issue_date) = patch.issue_date {
            query.push(", issue_date = ").push_bind(issue_date);
        }
        if let Some(expiry_date) = patch.expiry_date {
            query.push(", expiry_date = ").push_bind(expiry_date);
        }
        if let Some(credential_id) = &patch.credential_id {
            query.push(", credential_id = ").push_bind(credential_id.clone());
        }
        if let Some(credential_url) = &patch.credential_url {
            query.push(", credential_url = ").push_bind(credential_url.clone());
        }
        if let Some(description) = &patch.description {
            query.push(", description = ").push_bind(description.clone());
        }

        query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND deleted_at IS NULL RETURNING *");

        query
            .build_query_as::<Certification>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update certification", e))?
            .ok_or_else(|| AppError::not_found(format!("Certification {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE certifications SET deleted_at = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete certification", e))?;

        Ok(result.rows_affected() > 0)
    }
}
