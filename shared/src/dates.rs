//! Date helpers shared by the server and the views.
//!
//! Stored dates are either plain `YYYY-MM-DD` strings or RFC 3339
//! timestamps; both are accepted everywhere a date is read.

use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a stored date, taking the calendar date of a timestamp as written
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    // "2024-03-01T00:00:00" and friends without an offset
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Year component of a stored date
pub fn year_of(value: &str) -> Option<i32> {
    parse_date(value).map(|date| date.year())
}

/// Human-readable date, e.g. "June 15, 2024". Unparseable input is
/// returned unchanged.
pub fn format_display_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Format a calendar date the way the store expects it
pub fn to_iso_date(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}
