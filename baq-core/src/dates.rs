//! Date helpers shared across the BAQ crates.
//!
//! Dates live in two textual forms: the compact `YYYYMMDD` form stored in the
//! database, and the dashed `YYYY-MM-DD` form used by HTML date inputs, chart
//! payloads, and the daily dataset itself.

use chrono::{Duration, NaiveDate};

/// Compact date format used for database storage: "YYYYMMDD"
pub const COMPACT_FORMAT: &str = "%Y%m%d";

/// Dashed date format used by date inputs and chart payloads: "YYYY-MM-DD"
pub const DASHED_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DASHED_FORMAT).to_string()
}

/// Format a NaiveDate as "YYYYMMDD"
pub fn format_date_compact(date: &NaiveDate) -> String {
    date.format(COMPACT_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DASHED_FORMAT)?)
}

/// Parse a date string in "YYYYMMDD" format
pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, COMPACT_FORMAT)?)
}

/// Normalize a date string to the compact storage form.
///
/// Accepts "YYYYMMDD", "YYYY-MM-DD", and datetime strings whose first token
/// is one of those; any time-of-day part is discarded.
pub fn normalize_compact(s: &str) -> anyhow::Result<String> {
    let trimmed = s.trim();
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    let date = parse_date_compact(date_part).or_else(|_| parse_date(date_part))?;
    Ok(format_date_compact(&date))
}

/// Convert a compact date string to the dashed form.
pub fn compact_to_dashed(s: &str) -> anyhow::Result<String> {
    let date = parse_date_compact(s.trim())?;
    Ok(format_date(&date))
}

/// First day of the trailing 7-day window that ends on `end`, inclusive.
pub fn week_window_start(end: &NaiveDate) -> NaiveDate {
    *end - Duration::days(6)
}
