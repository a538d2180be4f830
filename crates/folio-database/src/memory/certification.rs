use async_trait::async_trait;
use chrono::Utc;

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{Certification, CreateCertification, UpdateCertification};

use super::MemoryTable;

/// In-memory certification metadata with soft deletes.
#[derive(Debug)]
pub struct MemoryCertificationRepository {
    table: MemoryTable<Certification>,
}

impl MemoryCertificationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for MemoryCertificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Certification, CreateCertification, UpdateCertification>
    for MemoryCertificationRepository
{
    async fn create(&self, data: &CreateCertification) -> AppResult<Certification> {
        if self.table.any(|c| c.file_name == data.file_name).await {
            return Err(AppError::conflict(
                "Failed to create certification: duplicate entry",
            ));
        }

        let now = Utc::now();
        Ok(self
            .table
            .insert_with(|id| Certification {
                id,
                title: data.title.clone(),
                issuer: data.issuer.clone(),
                issue_date: data.issue_date,
                expiry_date: data.expiry_date,
                credential_id: data.credential_id.clone(),
                credential_url: data.credential_url.clone(),
                file_url: data.file_url.clone(),
                file_name: data.file_name.clone(),
                original_name: data.original_name.clone(),
                file_size: data.file_size,
                mime_type: data.mime_type.clone(),
                description: data.description.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .await)
    }

    async fn find_all(&self) -> AppResult<Vec<Certification>> {
        let mut rows: Vec<_> = self
            .table
            .all()
            .await
            .into_iter()
            .filter(|c| !c.is_deleted())
            .collect();
        rows.sort_by(|a, b| b.issue_date.cmp(&a.issue_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Certification>> {
        Ok(self.table.get(id).await.filter(|c| !c.is_deleted()))
    }

    async fn update(&self, id: i64, patch: &UpdateCertification) -> AppResult<Certification> {
        self.table
            .modify(id, |row| {
                if row.is_deleted() {
                    return false;
                }
                if let Some(title) = &patch.title {
                    row.title = title.clone();
                }
                if let Some(issuer) = &patch.issuer {
                    row.issuer = issuer.clone();
                }
                if let Some(issue_date) = patch.issue_date {
                    row.issue_date = issue_date;
                }
                if let Some(expiry_date) = patch.expiry_date {
                    row.expiry_date = Some(expiry_date);
                }
                if let Some(credential_id) = &patch.credential_id {
                    row.credential_id = Some(credential_id.clone());
                }
                if let Some(credential_url) = &patch.credential_url {
                    row.credential_url = Some(credential_url.clone());
                }
                if let Some(description) = &patch.description {
                    row.description = Some(description.clone());
                }
                row.updated_at = Utc::now();
                true
            })
            .await
            .ok_or_else(|| AppError::not_found(format!("Certification {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let deleted = self
            .table
            .modify(id, |row| {
                if row.is_deleted() {
                    return false;
                }
                let now = Utc::now();
                row.deleted_at = Some(now);
                row.updated_at = now;
                true
            })
            .await;
        Ok(deleted.is_some())
    }
}
