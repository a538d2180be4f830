//! Portfolio project entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A side or professional project shown on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// What the project is.
    pub description: String,
    /// Project homepage or repository.
    pub url: Option<String>,
    /// Technologies used, stored as a JSON array.
    #[sqlx(json)]
    pub technologies: Vec<String>,
    /// When work started.
    pub start_date: NaiveDate,
    /// When work ended; `None` while ongoing.
    pub end_date: Option<NaiveDate>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub technologies: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Partial update of a project.
///
/// `end_date` is doubly optional: `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}
