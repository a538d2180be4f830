//! Certification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A certificate file together with its descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Certification {
    /// Unique certification identifier.
    pub id: i64,
    /// Display title (defaults to the stored file name).
    pub title: String,
    /// Issuing organization (defaults to `"N/A"`).
    pub issuer: String,
    /// When the certification was issued.
    pub issue_date: DateTime<Utc>,
    /// When the certification expires, if ever.
    pub expiry_date: Option<DateTime<Utc>>,
    /// Issuer-assigned credential identifier.
    pub credential_id: Option<String>,
    /// Issuer-hosted verification URL.
    pub credential_url: Option<String>,
    /// Public URL of the stored file.
    pub file_url: String,
    /// Generated storage name of the file.
    pub file_name: String,
    /// File name as uploaded by the client.
    pub original_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// MIME type declared by the client.
    pub mime_type: String,
    /// Free-text description.
    pub description: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone. Live records have `None`.
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Certification {
    /// Whether the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new certification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCertification {
    pub title: String,
    pub issuer: String,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub description: Option<String>,
}

/// Partial update of a certification's descriptive fields.
///
/// `None` leaves a field untouched. File-related columns are immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCertification {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

impl UpdateCertification {
    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.issuer.is_none()
            && self.issue_date.is_none()
            && self.expiry_date.is_none()
            && self.credential_id.is_none()
            && self.credential_url.is_none()
            && self.description.is_none()
    }
}
