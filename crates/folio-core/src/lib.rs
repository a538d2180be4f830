//! # folio-core
//!
//! Core crate for Folio. Contains the collaborator traits consumed by the
//! upload pipeline, configuration schemas, the deadline-bearing
//! cancellation context, date parsing helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Folio crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
