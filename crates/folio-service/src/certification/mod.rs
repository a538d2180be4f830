//! Certification services: validation, batch upload, lookup and delete.

pub mod service;
pub mod upload;
pub mod validator;

pub use service::CertificationService;
pub use upload::{
    BatchStatus, BatchSummary, BatchUploader, CertificationMetadata, UploadError, UploadJob,
    UploadOutcome,
};
