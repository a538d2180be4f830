//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod certification;
pub mod experience;
pub mod files;
pub mod health;
pub mod project;
