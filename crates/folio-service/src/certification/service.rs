//! Certification lookup, batch upload, and deletion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use folio_core::config::UploadConfig;
use folio_core::error::AppError;
use folio_core::traits::ObjectStore;
use folio_core::types::Deadline;
use folio_database::repositories::CertificationStore;
use folio_entity::Certification;

use super::upload::{BatchUploader, UploadJob, UploadOutcome};

/// Certification operations over a metadata repository and an object store.
#[derive(Clone)]
pub struct CertificationService {
    /// Certification records.
    repo: Arc<CertificationStore>,
    /// Stored certificate files.
    store: Arc<dyn ObjectStore>,
    /// Batch coordinator sharing the same collaborators.
    uploader: BatchUploader,
}

impl std::fmt::Debug for CertificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificationService")
            .field("uploader", &self.uploader)
            .finish()
    }
}

impl CertificationService {
    /// Creates a new certification service.
    pub fn new(
        repo: Arc<CertificationStore>,
        store: Arc<dyn ObjectStore>,
        upload: &UploadConfig,
    ) -> Self {
        let uploader = BatchUploader::new(Arc::clone(&store), Arc::clone(&repo))
            .with_default_workers(upload.default_workers);
        Self {
            repo,
            store,
            uploader,
        }
    }

    /// Lists live certifications, newest issue date first.
    pub async fn get_all(&self) -> Result<Vec<Certification>, AppError> {
        self.repo.find_all().await
    }

    /// Gets one live certification.
    pub async fn get_by_id(&self, id: i64) -> Result<Certification, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("certification not found"))
    }

    /// Uploads a batch; see [`BatchUploader::store_batch`].
    pub async fn store_batch(
        &self,
        jobs: Vec<UploadJob>,
        worker_hint: usize,
        base_url: &str,
        deadline: &Deadline,
    ) -> Vec<UploadOutcome> {
        self.uploader
            .store_batch(jobs, worker_hint, base_url, deadline)
            .await
    }

    /// Deletes a certification record, then its stored file.
    ///
    /// The record deletion decides the result; a failed file removal is
    /// only logged.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let certification = self.get_by_id(id).await?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("certification not found"));
        }

        if let Err(e) = self.store.delete(&certification.file_name).await {
            warn!(
                certification_id = id,
                file = %certification.file_name,
                error = %e,
                "Failed to delete certification file"
            );
        }

        info!(certification_id = id, file = %certification.file_name, "Certification deleted");
        Ok(())
    }

    /// Reads a stored certificate file by its storage name.
    pub async fn read_file(&self, file_name: &str) -> Result<Bytes, AppError> {
        self.store.read_bytes(file_name).await
    }
}
