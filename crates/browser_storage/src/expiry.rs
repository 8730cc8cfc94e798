//! Parsing of host-supplied expiry timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::StorageError;

/// Parses an expiry instant.
///
/// Accepts RFC 3339 (`2030-01-01T00:00:00+00:00`), naive ISO date-times (read as UTC) and bare
/// dates (`2030-01-01`, midnight UTC).
///
/// # Errors
///
/// Returns [`StorageError::InvalidExpiry`] when `raw` matches none of those forms.
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(StorageError::InvalidExpiry(raw.to_string()))
}

/// Parses an optional expiry; absent or blank input means "no expiry".
///
/// # Errors
///
/// Propagates [`parse_expiry`] failures for non-blank input.
pub fn parse_optional_expiry(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, StorageError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_expiry(raw).map(Some),
        _ => Ok(None),
    }
}
