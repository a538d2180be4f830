//! Experience CRUD with date-range checks.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use folio_core::error::AppError;
use folio_database::repositories::ExperienceStore;
use folio_entity::{CreateExperience, Experience, UpdateExperience};

/// Handles work experience entries.
#[derive(Clone)]
pub struct ExperienceService {
    /// Experience repository.
    repo: Arc<ExperienceStore>,
}

impl std::fmt::Debug for ExperienceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExperienceService").finish_non_exhaustive()
    }
}

/// Rejects ranges whose end precedes their start.
pub(crate) fn check_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), AppError> {
    match end {
        Some(end) if end < start => Err(AppError::validation("end date must be after start date")),
        _ => Ok(()),
    }
}

impl ExperienceService {
    /// Creates a new experience service.
    pub fn new(repo: Arc<ExperienceStore>) -> Self {
        Self { repo }
    }

    /// Lists experiences, most recent start first.
    pub async fn get_all(&self) -> Result<Vec<Experience>, AppError> {
        self.repo.find_all().await
    }

    /// Gets one experience.
    pub async fn get_by_id(&self, id: i64) -> Result<Experience, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("experience not found"))
    }

    /// Creates an experience.
    pub async fn create(&self, data: CreateExperience) -> Result<Experience, AppError> {
        check_date_range(data.start_date, data.end_date)?;

        let experience = self.repo.create(&data).await?;
        info!(experience_id = experience.id, company = %experience.company, "Experience created");
        Ok(experience)
    }

    /// Applies a partial update.
    pub async fn update(&self, id: i64, patch: UpdateExperience) -> Result<Experience, AppError> {
        let existing = self.get_by_id(id).await?;

        let start = patch.start_date.unwrap_or(existing.start_date);
        let end = patch.end_date.unwrap_or(existing.end_date);
        check_date_range(start, end)?;

        let experience = self.repo.update(id, &patch).await.map_err(not_found_as_experience)?;
        info!(experience_id = id, "Experience updated");
        Ok(experience)
    }

    /// Deletes an experience.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("experience not found"));
        }
        info!(experience_id = id, "Experience deleted");
        Ok(())
    }
}

fn not_found_as_experience(err: AppError) -> AppError {
    if err.is_not_found() {
        AppError::not_found("experience not found")
    } else {
        err
    }
}
