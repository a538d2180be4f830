//! Typed path parameter helpers.

use folio_core::error::AppError;

/// Parses a numeric record id from a path segment.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::validation("Invalid ID"))
}
