//! Work experience entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How a position was worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum EmploymentType {
    /// Fully remote.
    Remote,
    /// At the employer's premises.
    #[serde(rename = "On Site")]
    #[sqlx(rename = "On Site")]
    OnSite,
    /// Mixed remote and on-site.
    Hybrid,
}

impl EmploymentType {
    /// Return the canonical display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::OnSite => "On Site",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = folio_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Remote" => Ok(Self::Remote),
            "On Site" => Ok(Self::OnSite),
            "Hybrid" => Ok(Self::Hybrid),
            _ => Err(folio_core::AppError::validation(format!(
                "Invalid employment type: '{s}'. Expected one of: Remote, On Site, Hybrid"
            ))),
        }
    }
}

/// A position held, shown on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Experience {
    /// Unique experience identifier.
    pub id: i64,
    /// Job title.
    pub title: String,
    /// Employer name.
    pub company: String,
    /// Employer website.
    pub url: Option<String>,
    /// Where the job was based.
    pub location: String,
    /// Remote, on-site or hybrid.
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    /// First day in the position.
    pub start_date: NaiveDate,
    /// Last day in the position; `None` while current.
    pub end_date: Option<NaiveDate>,
    /// What the job involved.
    pub description: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new experience record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExperience {
    pub title: String,
    pub company: String,
    pub url: Option<String>,
    pub location: String,
    pub employment_type: EmploymentType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

/// Partial update of an experience.
///
/// `end_date` is doubly optional: `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
}
