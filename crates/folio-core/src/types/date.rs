//! Lenient calendar date parsing for user-supplied form values.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::AppError;
use crate::result::AppResult;

/// Accepted layouts, tried in order. Day-first layouts come before
/// year-first ones; four-digit-year variants are tried before two-digit ones.
const DATE_FORMATS: &[(&str, bool)] = &[
    ("%d/%m/%Y", true),
    ("%d/%m/%y", false),
    ("%d-%m-%Y", true),
    ("%d-%m-%y", false),
    ("%Y-%m-%d", true),
    ("%Y/%m/%d", true),
];

/// Parse a calendar date such as `15/01/2024`, `1-2-24` or `2024-01-15`.
pub fn parse_naive_date(input: &str) -> AppResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::validation("date cannot be empty"));
    }

    for (format, four_digit_year) in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            // `%Y` happily reads "24" as year 24; leave those to `%y`.
            if *four_digit_year && date.year() < 1000 {
                continue;
            }
            return Ok(date);
        }
    }

    Err(AppError::validation(format!("invalid date format: {input}")))
}

/// Parse a calendar date and return it as UTC midnight.
pub fn parse_date(input: &str) -> AppResult<DateTime<Utc>> {
    let date = parse_naive_date(input)?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}
