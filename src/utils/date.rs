// src/utils/date.rs

//! Date parsing and display formatting.
//!
//! Board dates arrive as long-form text (`Fri, May 15, 2026`), ISO dates
//! (`2026-05-15`) or timestamps. Display formatting is one-way: a formatted
//! date is not guaranteed to parse back.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::PLACEHOLDER;

/// Locale used for rendered month names.
const DISPLAY_LOCALE: Locale = Locale::id_ID;

/// `15 Mei 2026`
const DISPLAY_FORMAT: &str = "%-d %B %Y";

const DATE_FORMATS: &[&str] = &[
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a board date string into a calendar date.
///
/// A leading weekday (`Fri, ...`) is ignored rather than checked against the
/// date, so mismatched weekdays still parse.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = strip_weekday(input.trim());
    if s.is_empty() || s == PLACEHOLDER {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Format a board date for display, returning the input unchanged when it
/// does not parse.
pub fn format_date(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return PLACEHOLDER.to_string();
    }

    match parse_date(trimmed) {
        Some(date) => display(date),
        None => {
            tracing::trace!("Date {:?} did not parse; keeping as-is", input);
            input.to_string()
        }
    }
}

/// Render a date in the display locale.
pub fn display(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(DISPLAY_FORMAT, DISPLAY_LOCALE)
        .to_string()
}

fn strip_weekday(s: &str) -> &str {
    match s.split_once(',') {
        Some((head, rest))
            if rest.contains(',')
                && !head.trim().is_empty()
                && head.trim().chars().all(char::is_alphabetic) =>
        {
            rest.trim()
        }
        _ => s,
    }
}
