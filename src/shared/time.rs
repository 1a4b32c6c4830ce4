//! Date parsing for form-style inputs.

use chrono::{DateTime, NaiveDate, Utc};

use super::errors::{DomainError, DomainResult};

/// Parses either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (interpreted as midnight UTC), which is what HTML date inputs submit.
pub fn parse_datetime(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "{} must be a date (YYYY-MM-DD) or an RFC 3339 timestamp",
                field
            ))
        })
}

/// Like [`parse_datetime`] but treats a missing or blank value as `None`.
pub fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> DomainResult<Option<DateTime<Utc>>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_datetime(field, v).map(Some),
    }
}

/// Patch for an optional date column: `None` keeps the stored value,
/// `Some(None)` or a blank string clears it.
pub fn patch_datetime(
    field: &str,
    value: Option<Option<String>>,
) -> DomainResult<Option<Option<DateTime<Utc>>>> {
    match value {
        None => Ok(None),
        Some(raw) => parse_optional_datetime(field, raw.as_deref()).map(Some),
    }
}
