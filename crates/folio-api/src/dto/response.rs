//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_entity::{Certification, User};
use folio_service::{BatchSummary, UploadOutcome};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// The logged-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// A file that was stored and recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    pub title: String,
    pub issuer: String,
    pub issue_date: DateTime<Utc>,
    pub file_url: String,
    pub file_name: String,
    pub original_name: String,
}

impl From<Certification> for UploadedFile {
    fn from(c: Certification) -> Self {
        Self {
            id: c.id,
            title: c.title,
            issuer: c.issuer,
            issue_date: c.issue_date,
            file_url: c.file_url,
            file_name: c.file_name,
            original_name: c.original_name,
        }
    }
}

/// A file that could not be uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFailure {
    /// Client file name.
    pub original: String,
    /// Why it failed.
    pub error: String,
}

/// Per-file report for a batch upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadResponse {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub files: Vec<UploadedFile>,
    pub errors: Vec<UploadFailure>,
}

impl BatchUploadResponse {
    /// Splits outcomes into stored files and failures.
    pub fn from_outcomes(outcomes: Vec<UploadOutcome>) -> Self {
        let summary = BatchSummary::from_outcomes(&outcomes);
        let mut files = Vec::with_capacity(summary.successful);
        let mut errors = Vec::with_capacity(summary.failed);

        for outcome in outcomes {
            match outcome {
                UploadOutcome::Success(record) => files.push(record.into()),
                UploadOutcome::Failure {
                    original_name,
                    cause,
                } => errors.push(UploadFailure {
                    original: original_name,
                    error: cause.to_string(),
                }),
            }
        }

        Self {
            total: summary.total,
            successful: summary.successful,
            failed: summary.failed,
            files,
            errors,
        }
    }
}
