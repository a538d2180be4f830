//! Request DTOs with validation.
//!
//! Dates arrive as strings in any format [`parse_naive_date`] accepts and
//! are converted into entity payloads here.

use serde::{Deserialize, Serialize};
use validator::Validate;

use folio_core::error::AppError;
use folio_core::types::parse_naive_date;
use folio_entity::{
    CreateExperience, CreateProject, EmploymentType, UpdateExperience, UpdateProject,
};

/// Runs `validator` rules and flattens failures into one validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}

fn optional_date(value: Option<&str>) -> Result<Option<chrono::NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_naive_date(raw).map(Some),
    }
}

/// Patch semantics for an end date: absent keeps, empty clears, else sets.
fn patch_date(value: Option<&str>) -> Result<Option<Option<chrono::NaiveDate>>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => optional_date(Some(raw)).map(Some),
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Query string of the batch upload endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    /// Worker count hint; 0 or absent uses the server default.
    pub workers: Option<String>,
}

/// Body for creating an experience.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExperienceRequest {
    #[validate(length(min = 1, max = 255, message = "title is required (max 255 characters)"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "company is required (max 255 characters)"))]
    pub company: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    #[validate(length(min = 1, max = 255, message = "location is required (max 255 characters)"))]
    pub location: String,
    /// `Remote`, `On Site` or `Hybrid`.
    #[serde(rename = "type")]
    pub employment_type: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

impl CreateExperienceRequest {
    /// Validates and converts into the entity payload.
    pub fn into_entity(self) -> Result<CreateExperience, AppError> {
        validate_request(&self)?;
        Ok(CreateExperience {
            employment_type: self.employment_type.parse::<EmploymentType>()?,
            start_date: parse_naive_date(&self.start_date)?,
            end_date: optional_date(self.end_date.as_deref())?,
            title: self.title,
            company: self.company,
            url: self.url.filter(|u| !u.is_empty()),
            location: self.location,
            description: self.description,
        })
    }
}

/// Body for patching an experience. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateExperienceRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "company must be 1-255 characters"))]
    pub company: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    #[validate(length(min = 1, max = 255, message = "location must be 1-255 characters"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub employment_type: Option<String>,
    pub start_date: Option<String>,
    /// An empty string clears the end date.
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl UpdateExperienceRequest {
    /// Validates and converts into the entity patch.
    pub fn into_entity(self) -> Result<UpdateExperience, AppError> {
        validate_request(&self)?;
        Ok(UpdateExperience {
            employment_type: self
                .employment_type
                .as_deref()
                .map(str::parse::<EmploymentType>)
                .transpose()?,
            start_date: self.start_date.as_deref().map(parse_naive_date).transpose()?,
            end_date: patch_date(self.end_date.as_deref())?,
            title: self.title,
            company: self.company,
            url: self.url,
            location: self.location,
            description: self.description,
        })
    }
}

/// Body for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "name is required (max 255 characters)"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl CreateProjectRequest {
    /// Validates and converts into the entity payload.
    pub fn into_entity(self) -> Result<CreateProject, AppError> {
        validate_request(&self)?;
        Ok(CreateProject {
            start_date: parse_naive_date(&self.start_date)?,
            end_date: optional_date(self.end_date.as_deref())?,
            name: self.name,
            description: self.description,
            url: self.url.filter(|u| !u.is_empty()),
            technologies: self.technologies,
        })
    }
}

/// Body for patching a project. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub start_date: Option<String>,
    /// An empty string clears the end date.
    pub end_date: Option<String>,
}

impl UpdateProjectRequest {
    /// Validates and converts into the entity patch.
    pub fn into_entity(self) -> Result<UpdateProject, AppError> {
        validate_request(&self)?;
        Ok(UpdateProject {
            start_date: self.start_date.as_deref().map(parse_naive_date).transpose()?,
            end_date: patch_date(self.end_date.as_deref())?,
            name: self.name,
            description: self.description,
            url: self.url,
            technologies: self.technologies,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn experience() -> CreateExperienceRequest {
        CreateExperienceRequest {
            title: "Engineer".into(),
            company: "Acme".into(),
            url: Some("https://acme.example".into()),
            location: "Remote".into(),
            employment_type: "On Site".into(),
            start_date: "01/02/2023".into(),
            end_date: Some(String::new()),
            description: "Built things".into(),
        }
    }

    #[test]
    fn test_create_experience_conversion() {
        let entity = experience().into_entity().unwrap();
        assert_eq!(entity.employment_type, EmploymentType::OnSite);
        assert_eq!(entity.start_date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(entity.end_date, None);
    }

    #[test]
    fn test_create_experience_rejections() {
        let mut req = experience();
        req.title = String::new();
        assert!(req.into_entity().unwrap_err().message.contains("title"));

        let mut req = experience();
        req.url = Some("not a url".into());
        assert!(req.into_entity().is_err());

        let mut req = experience();
        req.employment_type = "Contract".into();
        assert!(req.into_entity().is_err());

        let mut req = experience();
        req.start_date = "yesterday".into();
        assert!(req.into_entity().is_err());
    }

    #[test]
    fn test_patch_end_date_semantics() {
        let keep = UpdateExperienceRequest::default().into_entity().unwrap();
        assert_eq!(keep.end_date, None);

        let clear = UpdateExperienceRequest {
            end_date: Some(String::new()),
            ..Default::default()
        }
        .into_entity()
        .unwrap();
        assert_eq!(clear.end_date, Some(None));

        let set = UpdateProjectRequest {
            end_date: Some("2024-05-01".into()),
            ..Default::default()
        }
        .into_entity()
        .unwrap();
        assert_eq!(set.end_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1)));
    }

    #[test]
    fn test_login_requires_email() {
        let req = LoginRequest {
            email: "nope".into(),
            password: "x".into(),
        };
        assert!(validate_request(&req).is_err());
    }
}
