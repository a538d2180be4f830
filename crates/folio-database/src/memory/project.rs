use async_trait::async_trait;
use chrono::Utc;

use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_core::traits::Repository;
use folio_entity::{CreateProject, Project, UpdateProject};

use super::MemoryTable;

/// In-memory project records.
#[derive(Debug)]
pub struct MemoryProjectRepository {
    table: MemoryTable<Project>,
}

impl MemoryProjectRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for MemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Project, CreateProject, UpdateProject> for MemoryProjectRepository {
    async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        let now = Utc::now();
        Ok(self
            .table
            .insert_with(|id| Project {
                id,
                name: data.name.clone(),
                description: data.description.clone(),
                url: data.url.clone(),
                technologies: data.technologies.clone(),
                start_date: data.start_date,
                end_date: data.end_date,
                created_at: now,
                updated_at: now,
            })
            .await)
    }

    async fn find_all(&self) -> AppResult<Vec<Project>> {
        let mut rows = self.table.all().await;
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Project>> {
        Ok(self.table.get(id).await)
    }

    async fn update(&self, id: i64, patch: &UpdateProject) -> AppResult<Project> {
        self.table
            .modify(id, |row| {
                if let Some(name) = &patch.name {
                    row.name = name.clone();
                }
                if let Some(description) = &patch.description {
                    row.description = description.clone();
                }
                if let Some(url) = &patch.url {
                    row.url = Some(url.clone());
                }
                if let Some(technologies) = &patch.technologies {
                    row.technologies = technologies.clone();
                }
                if let Some(start_date) = patch.start_date {
                    row.start_date = start_date;
                }
                if let Some(end_date) = patch.end_date {
                    row.end_date = end_date;
                }
                row.updated_at = Utc::now();
                true
            })
            .await
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.remove(id).await)
    }
}
