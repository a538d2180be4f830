//! # folio-entity
//!
//! Domain entity models for Folio. Every struct in this crate represents a
//! database table row or the payload used to create or patch one. Row
//! types additionally derive `sqlx::FromRow`.

pub mod certification;
pub mod experience;
pub mod project;
pub mod user;

pub use certification::{Certification, CreateCertification, UpdateCertification};
pub use experience::{CreateExperience, EmploymentType, Experience, UpdateExperience};
pub use project::{CreateProject, Project, UpdateProject};
pub use user::{Session, User};
