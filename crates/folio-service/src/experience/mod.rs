//! Work experience services.

pub mod service;

pub use service::ExperienceService;
