//! Publication date labels for list rows and the detail header.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Timestamp shapes the content API has been seen to emit, tried in order.
const UTC_PATTERNS: &[&str] = &["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.3fZ"];
const OFFSET_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.3f%z",
    "%Y-%m-%d %H:%M:%S %z",
];

pub fn parse_publication_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for pattern in UTC_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for pattern in OFFSET_PATTERNS {
        if let Ok(date) = DateTime::parse_from_str(raw, pattern) {
            return Some(date.with_timezone(&Utc));
        }
    }
    None
}

/// Label a publication timestamp relative to the local clock. Unparseable
/// input is returned unchanged.
pub fn format_publication_date(raw: &str) -> String {
    format_publication_date_at(raw, &Local::now())
}

/// Same as [`format_publication_date`] with an explicit "now". Calendar days
/// are compared in the time zone of `now`.
pub fn format_publication_date_at<Tz>(raw: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_publication_date(raw) {
        Some(date) => format_for_display(&date.with_timezone(&now.timezone()), now),
        None => {
            tracing::debug!(raw, "Unrecognised publication date, showing it as-is");
            raw.to_string()
        }
    }
}

fn format_for_display<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        format!("Today at {}", date.format("%H:%M"))
    } else if today.pred_opt() == Some(day) {
        format!("Yesterday at {}", date.format("%H:%M"))
    } else if day.year() == today.year() {
        date.format("%b %-d, %Y at %H:%M").to_string()
    } else {
        date.format("%A, %B %-d, %Y at %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_parses_every_known_pattern() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        for raw in [
            "2024-03-15T09:30:00Z",
            "2024-03-15T09:30:00+0000",
            "2024-03-15T09:30:00.000Z",
            "2024-03-15T10:30:00.000+0100",
            "2024-03-15 09:30:00 +0000",
        ] {
            assert_eq!(parse_publication_date(raw), Some(expected), "pattern {}", raw);
        }
    }

    #[test]
    fn test_today_and_yesterday() {
        assert_eq!(
            format_publication_date_at("2024-03-15T09:30:00Z", &now()),
            "Today at 09:30"
        );
        assert_eq!(
            format_publication_date_at("2024-03-14T23:59:00Z", &now()),
            "Yesterday at 23:59"
        );
    }

    #[test]
    fn test_same_year_uses_medium_date() {
        assert_eq!(
            format_publication_date_at("2024-01-05T14:30:00Z", &now()),
            "Jan 5, 2024 at 14:30"
        );
    }

    #[test]
    fn test_other_year_uses_full_date() {
        let label = format_publication_date_at("2023-01-01T12:00:00Z", &now());
        assert_eq!(label, "Sunday, January 1, 2023 at 12:00");
        assert!(label.contains("2023"));
    }

    #[test]
    fn test_unparseable_input_is_returned_raw() {
        assert_eq!(format_publication_date_at("last tuesday", &now()), "last tuesday");
        assert_eq!(format_publication_date(""), "");
    }

    #[test]
    fn test_local_clock_formats_something() {
        let label = format_publication_date("2023-01-01T12:00:00Z");
        assert!(!label.is_empty());
        assert_ne!(label, "2023-01-01T12:00:00Z");
    }
}
