//! Input validation for API requests.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for the ISO date shape; the calendar check happens after
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Validate a `YYYY-MM-DD` date string: it must match the shape and name a
/// real calendar date (so `2024-02-29` passes, `2023-02-29` does not).
pub fn validate_date(date: &str) -> Result<(), String> {
    if !DATE_REGEX.is_match(date) {
        return Err("Invalid date format. Use YYYY-MM-DD".to_string());
    }
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err("Invalid date format. Use YYYY-MM-DD".to_string());
    }
    Ok(())
}
