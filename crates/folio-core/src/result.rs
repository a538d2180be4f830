//! Convenience result alias used across all Folio crates.

use crate::error::AppError;

/// Result type with [`AppError`] as the error variant.
pub type AppResult<T> = Result<T, AppError>;
