//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// The timestamp type used across signing: an UTC datetime.
pub type DateTime = chrono::DateTime<Utc>;

/// Get the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a datetime into the compact date form: `20230101`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format a datetime into the compact ISO 8601 form: `20230101T000000Z`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse an RFC 3339 timestamp like `2023-01-01T00:00:00Z`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| Error::unexpected(format!("invalid timestamp {s}")).with_source(e))?;
    Ok(t.with_timezone(&Utc))
}
