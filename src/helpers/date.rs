//! Date helper functions
//!
//! Blog dates are free-form strings written by hand ("Oct 12, 2023",
//! "2024-01-15"), so parsing tries a list of common layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Layouts carrying a date only
const DATE_FORMATS: &[&str] = &[
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
];

/// Layouts carrying a date and a time
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%b %d, %Y %H:%M",
];

/// The Unix epoch, used as the date of undated content
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Parse a free-form date string
///
/// # Examples
/// ```ignore
/// parse_date("Oct 12, 2023") // -> 2023-10-12T00:00:00
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Zoned timestamps are compared in UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Parse a date, falling back to the epoch
pub fn parse_date_or_epoch(s: Option<&str>) -> NaiveDateTime {
    s.and_then(parse_date).unwrap_or_else(epoch)
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format date as YYYY-MM-DD
pub fn iso_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}
