//! Batch certificate upload coordinator.
//!
//! A batch is fanned out to a fixed-size pool of tokio tasks that drain a
//! shared intake queue. Each job runs validate → store → record, with a
//! compensating delete of the stored file when the record cannot be
//! written. Every job yields exactly one [`UploadOutcome`]; partial failure
//! is reported as data, never as an error for the batch.

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use futures::FutureExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use folio_core::error::AppError;
use folio_core::traits::ObjectStore;
use folio_core::types::{Deadline, DoneCause, parse_date};
use folio_database::repositories::CertificationStore;
use folio_entity::{Certification, CreateCertification};

use super::validator;

/// Worker count used when the caller does not ask for one.
pub const DEFAULT_WORKERS: usize = 3;

/// Optional descriptive fields applied to every file of a batch.
///
/// Values are raw form input; dates are parsed leniently during the upload.
#[derive(Debug, Clone, Default)]
pub struct CertificationMetadata {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

/// One file submitted for upload.
#[derive(Debug, Clone)]
pub struct UploadJob {
    /// File name as sent by the client.
    pub original_name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
    /// Batch metadata, if any was supplied.
    pub metadata: Option<CertificationMetadata>,
}

impl UploadJob {
    /// A job whose declared size is the length of `data`.
    pub fn new(original_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            original_name: original_name.into(),
            size: data.len() as u64,
            content_type: content_type.into(),
            data,
            metadata: None,
        }
    }

    /// Attach batch metadata.
    pub fn with_metadata(mut self, metadata: CertificationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Why a single job failed.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The file extension is not on the allow-list.
    #[error("invalid file type: only JPG, JPEG, PNG, and WEBP images are allowed")]
    InvalidFileType {
        /// Offending extension, if the name had one.
        extension: Option<String>,
    },
    /// The batch was cancelled before this job started.
    #[error("upload not started: {}", DoneCause::Cancelled)]
    Cancelled,
    /// The batch deadline passed before this job started.
    #[error("upload not started: {}", DoneCause::DeadlineExceeded)]
    DeadlineExceeded,
    /// Writing the file to the object store failed.
    #[error("failed to save file: {0}")]
    Storage(AppError),
    /// Writing the metadata record failed; the stored file was removed.
    #[error("failed to save certification: {0}")]
    Metadata(AppError),
    /// The job's task faulted unexpectedly.
    #[error("internal error while processing file: {0}")]
    WorkerFault(String),
}

impl From<DoneCause> for UploadError {
    fn from(cause: DoneCause) -> Self {
        match cause {
            DoneCause::Cancelled => Self::Cancelled,
            DoneCause::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

/// The result of one job.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// The file is stored and its record committed.
    Success(Certification),
    /// Nothing attributable to this job persists.
    Failure {
        /// Client file name, for correlating with the input.
        original_name: String,
        /// What went wrong.
        cause: UploadError,
    },
}

impl UploadOutcome {
    fn failure(original_name: impl Into<String>, cause: UploadError) -> Self {
        Self::Failure {
            original_name: original_name.into(),
            cause,
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Client file name of the job this outcome belongs to.
    pub fn original_name(&self) -> &str {
        match self {
            Self::Success(record) => &record.original_name,
            Self::Failure { original_name, .. } => original_name,
        }
    }
}

/// Overall verdict for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every file succeeded.
    AllSucceeded,
    /// Some, but not all, files succeeded.
    Partial,
    /// No file succeeded.
    AllFailed,
}

/// Counts derived from a batch's outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Tally a set of outcomes.
    pub fn from_outcomes(outcomes: &[UploadOutcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }

    /// Overall verdict.
    pub fn status(&self) -> BatchStatus {
        if self.successful == 0 {
            BatchStatus::AllFailed
        } else if self.failed == 0 {
            BatchStatus::AllSucceeded
        } else {
            BatchStatus::Partial
        }
    }
}

/// Pool size for a batch: the hint (or `default` when zero), never more than `jobs`.
pub fn resolve_worker_count(hint: usize, default: usize, jobs: usize) -> usize {
    let wanted = if hint == 0 { default.max(1) } else { hint };
    wanted.min(jobs)
}

/// Collision-resistant storage name: `{unix_nanos}-{uuid}{ext}`.
pub fn generate_storage_name(extension: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{nanos}-{}{extension}", Uuid::new_v4())
}

/// Shared intake queue. Pre-filled once; workers only ever pop.
#[derive(Debug)]
struct JobQueue {
    jobs: Mutex<VecDeque<UploadJob>>,
}

impl JobQueue {
    fn new(jobs: Vec<UploadJob>) -> Self {
        Self {
            jobs: Mutex::new(jobs.into()),
        }
    }

    fn pop(&self) -> Option<UploadJob> {
        // A poisoned lock still guards a consistent deque; keep draining it.
        let mut jobs = self.jobs.lock().unwrap_or_else(|p| p.into_inner());
        jobs.pop_front()
    }

    fn drain(&self) -> Vec<UploadJob> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|p| p.into_inner());
        jobs.drain(..).collect()
    }
}

/// Runs certificate batches against an object store and a metadata repository.
#[derive(Clone)]
pub struct BatchUploader {
    /// Where file bytes go.
    store: Arc<dyn ObjectStore>,
    /// Where records go.
    repo: Arc<CertificationStore>,
    /// Pool size when the caller passes a zero hint.
    default_workers: usize,
}

impl std::fmt::Debug for BatchUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchUploader")
            .field("store", &self.store.provider_type())
            .field("default_workers", &self.default_workers)
            .finish()
    }
}

impl BatchUploader {
    /// Create an uploader with [`DEFAULT_WORKERS`].
    pub fn new(store: Arc<dyn ObjectStore>, repo: Arc<CertificationStore>) -> Self {
        Self {
            store,
            repo,
            default_workers: DEFAULT_WORKERS,
        }
    }

    /// Override the pool size used for a zero hint.
    pub fn with_default_workers(mut self, workers: usize) -> Self {
        self.default_workers = workers.max(1);
        self
    }

    /// Upload every job and return one outcome per job, in completion order.
    ///
    /// Blocks until all workers have finished. Jobs not started before
    /// `deadline` is done fail with its cause; jobs already in flight run
    /// their current step to completion.
    pub async fn store_batch(
        &self,
        jobs: Vec<UploadJob>,
        worker_hint: usize,
        base_url: &str,
        deadline: &Deadline,
    ) -> Vec<UploadOutcome> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let total = jobs.len();
        let workers = resolve_worker_count(worker_hint, self.default_workers, total);
        info!(total, workers, "Starting batch upload");

        let queue = Arc::new(JobQueue::new(jobs));
        let base_url: Arc<str> = Arc::from(base_url);
        let (tx, mut rx) = mpsc::channel::<UploadOutcome>(total);

        let mut pool = JoinSet::new();
        for worker_id in 0..workers {
            let uploader = self.clone();
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let base_url = Arc::clone(&base_url);
            let deadline = deadline.clone();
            pool.spawn(async move {
                uploader
                    .run_worker(worker_id, &queue, &tx, &base_url, &deadline)
                    .await;
            });
        }
        drop(tx);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Upload worker terminated abnormally");
            }
        }

        // Only reachable if a worker died between jobs.
        for job in queue.drain() {
            outcomes.push(UploadOutcome::failure(
                job.original_name,
                UploadError::WorkerFault("worker stopped before processing this file".into()),
            ));
        }

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Finished batch upload: {}/{} successful",
            summary.successful,
            summary.total
        );

        outcomes
    }

    async fn run_worker(
        &self,
        worker_id: usize,
        queue: &JobQueue,
        tx: &mpsc::Sender<UploadOutcome>,
        base_url: &str,
        deadline: &Deadline,
    ) {
        while let Some(job) = queue.pop() {
            let original_name = job.original_name.clone();

            let outcome = match AssertUnwindSafe(self.process(job, base_url, deadline))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(panic) => {
                    let reason = panic_message(panic.as_ref());
                    error!(worker_id, file = %original_name, reason, "Upload job panicked");
                    UploadOutcome::failure(original_name, UploadError::WorkerFault(reason))
                }
            };

            if let UploadOutcome::Failure {
                original_name,
                cause,
            } = &outcome
            {
                warn!(worker_id, file = %original_name, error = %cause, "Upload failed");
            }

            if tx.send(outcome).await.is_err() {
                break;
            }
        }
    }

    /// validate → store → record, with compensation on record failure.
    async fn process(&self, job: UploadJob, base_url: &str, deadline: &Deadline) -> UploadOutcome {
        if let Some(cause) = deadline.cause() {
            return UploadOutcome::failure(job.original_name, cause.into());
        }

        let extension = match validator::validate_extension(&job.original_name) {
            Ok(ext) => ext,
            Err(cause) => return UploadOutcome::failure(job.original_name, cause),
        };

        let storage_name = generate_storage_name(&extension);
        if let Err(e) = self.store.save(&storage_name, job.data.clone()).await {
            return UploadOutcome::failure(job.original_name, UploadError::Storage(e));
        }

        let record = build_record(
            &job,
            &storage_name,
            self.store.public_url(base_url, &storage_name),
        );

        // The file is already stored, so a panicking write must still clean up.
        let cause = match AssertUnwindSafe(self.repo.create(&record))
            .catch_unwind()
            .await
        {
            Ok(Ok(certification)) => return UploadOutcome::Success(certification),
            Ok(Err(e)) => UploadError::Metadata(e),
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(file = %job.original_name, reason, "Metadata write panicked");
                UploadError::WorkerFault(reason)
            }
        };

        self.discard(&storage_name).await;
        UploadOutcome::failure(job.original_name, cause)
    }

    /// Best-effort removal of a stored file whose record was never written.
    async fn discard(&self, storage_name: &str) {
        if let Err(cleanup) = self.store.delete(storage_name).await {
            error!(
                file = %storage_name,
                error = %cleanup,
                "Failed to remove orphaned file after metadata write failure"
            );
        }
    }
}

/// Assemble the record for a stored file, applying metadata defaults.
fn build_record(job: &UploadJob, storage_name: &str, file_url: String) -> CreateCertification {
    let metadata = job.metadata.clone().unwrap_or_default();

    let title = non_blank(metadata.title).unwrap_or_else(|| job.original_name.clone());
    let issuer = non_blank(metadata.issuer).unwrap_or_else(|| "N/A".to_string());
    let issue_date = non_blank(metadata.issue_date)
        .and_then(|raw| parse_date(&raw).ok())
        .unwrap_or_else(Utc::now);
    let expiry_date = non_blank(metadata.expiry_date).and_then(|raw| parse_date(&raw).ok());

    CreateCertification {
        title,
        issuer,
        issue_date,
        expiry_date,
        credential_id: non_blank(metadata.credential_id),
        credential_url: non_blank(metadata.credential_url),
        file_url,
        file_name: storage_name.to_string(),
        original_name: job.original_name.clone(),
        file_size: i64::try_from(job.size).unwrap_or(i64::MAX),
        mime_type: job.content_type.clone(),
        description: non_blank(metadata.description),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
