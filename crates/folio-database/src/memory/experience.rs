use async_trait::async_trait;
use chrono::Utc;

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{CreateExperience, Experience, UpdateExperience};

use super::MemoryTable;

/// In-memory experience records.
#[derive(Debug)]
pub struct MemoryExperienceRepository {
    table: MemoryTable<Experience>,
}

impl MemoryExperienceRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for MemoryExperienceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Experience, CreateExperience, UpdateExperience> for MemoryExperienceRepository {
    async fn create(&self, data: &CreateExperience) -> AppResult<Experience> {
        let now = Utc::now();
        Ok(self
            .table
            .insert_with(|id| Experience {
                id,
                title: data.title.clone(),
                company: data.company.clone(),
                url: data.url.clone(),
                location: data.location.clone(),
                employment_type: data.employment_type,
                start_date: data.start_date,
                end_date: data.end_date,
                description: data.description.clone(),
                created_at: now,
                updated_at: now,
            })
            .await)
    }

    async fn find_all(&self) -> AppResult<Vec<Experience>> {
        let mut rows = self.table.all().await;
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Experience>> {
        Ok(self.table.get(id).await)
    }

    async fn update(&self, id: i64, patch: &UpdateExperience) -> AppResult<Experience> {
        self.table
            .modify(id, |row| {
                if let Some(title) = &patch.title {
                    row.title = title.clone();
                }
                if let Some(company) = &patch.company {
                    row.company = company.clone();
                }
                if let Some(url) = &patch.url {
                    row.url = Some(url.clone());
                }
                if let Some(location) = &patch.location {
                    row.location = location.clone();
                }
                if let Some(employment_type) = patch.employment_type {
                    row.employment_type = employment_type;
                }
                if let Some(start_date) = patch.start_date {
                    row.start_date = start_date;
                }
                if let Some(end_date) = patch.end_date {
                    row.end_date = end_date;
                }
                if let Some(description) = &patch.description {
                    row.description = description.clone();
                }
                row.updated_at = Utc::now();
                true
            })
            .await
            .ok_or_else(|| AppError::not_found(format!("Experience {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.remove(id).await)
    }
}
