// ABOUTME: Shared utility functions for Leadstage
// ABOUTME: Timestamp parsing and day arithmetic used by filters and classification

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a user-supplied timestamp. Accepts RFC 3339 or a bare `YYYY-MM-DD`
/// date (midnight UTC). Returns `None` for blank or unparseable input.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole days elapsed from `from` to `to`, never negative
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}
