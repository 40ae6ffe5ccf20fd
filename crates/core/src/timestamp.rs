//! Timestamp policy for artwork records.
//!
//! The artwork service does not format `createdAt` / `updatedAt`
//! uniformly, so parsing is lenient and never fatal: a value that cannot
//! be read becomes `None`, which sorts as the oldest possible instant and
//! is displayed as the raw wire text.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Display pattern for `updatedAt`, e.g. `01 June 2024 12:30`.
pub const DISPLAY_FORMAT: &str = "%d %B %Y %H:%M";

/// Offset-less layouts accepted after RFC 3339 fails. Read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a wire timestamp into UTC.
///
/// Accepts RFC 3339 (which covers `yyyy-MM-ddTHH:mm:ss.SSSZ`) and
/// ISO-8601 date-times without an offset. Returns `None` for anything
/// else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_naive(raw).map(|naive| naive.and_utc())
}

/// Render a wire timestamp for people, keeping its own offset.
///
/// Unparsable input comes back verbatim so nothing is hidden from the
/// reader.
pub fn format_for_display(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    match parse_naive(trimmed) {
        Some(naive) => naive.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
