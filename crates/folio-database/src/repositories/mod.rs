//! sqlx-backed repository implementations, one per entity.
//!
//! Each repository implements the generic
//! [`Repository`](folio_core::traits::Repository) trait; the aliases below
//! name the trait objects the service layer depends on.

pub mod auth;
pub mod certification;
pub mod experience;
pub mod project;

use folio_core::error::{AppError, ErrorKind};
use folio_core::traits::Repository;
use folio_entity::{
    Certification, CreateCertification, CreateExperience, CreateProject, Experience, Project,
    UpdateCertification, UpdateExperience, UpdateProject,
};

pub use auth::{AuthRepository, SqliteAuthRepository};
pub use certification::CertificationRepository;
pub use experience::ExperienceRepository;
pub use project::ProjectRepository;

/// Trait object for certification metadata storage.
pub type CertificationStore =
    dyn Repository<Certification, CreateCertification, UpdateCertification>;

/// Trait object for experience storage.
pub type ExperienceStore = dyn Repository<Experience, CreateExperience, UpdateExperience>;

/// Trait object for project storage.
pub type ProjectStore = dyn Repository<Project, CreateProject, UpdateProject>;

/// Map a sqlx error into an [`AppError`], surfacing unique violations as conflicts.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let is_unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if is_unique {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate entry"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
