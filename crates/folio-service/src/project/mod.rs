//! Portfolio project services.

pub mod service;

pub use service::ProjectService;
