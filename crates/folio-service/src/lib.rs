//! # folio-service
//!
//! Business logic service layer for Folio. The centrepiece is the batch
//! certificate upload coordinator in [`certification::upload`]; the other
//! services are thin orchestration over repositories.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod certification;
pub mod experience;
pub mod project;

pub use auth::{AuthService, PasswordHasher};
pub use certification::{
    BatchStatus, BatchSummary, BatchUploader, CertificationMetadata, CertificationService,
    UploadError, UploadJob, UploadOutcome,
};
pub use experience::ExperienceService;
pub use project::ProjectService;
