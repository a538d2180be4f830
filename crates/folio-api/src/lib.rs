//! # folio-api
//!
//! HTTP API layer for Folio built on Axum.
//!
//! Provides the REST endpoints for certifications, experiences, projects
//! and sessions, the middleware stack (CORS, request logging, rate
//! limiting), the cookie-session extractor, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
