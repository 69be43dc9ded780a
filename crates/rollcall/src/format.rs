//! Display formatting for backend timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Shown in place of a timestamp that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Parses a backend timestamp into local wall-clock time.
///
/// Offset-qualified values are converted to the local zone; values without an offset
/// are already local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Local).naive_local());
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a backend timestamp as `MM/DD/YYYY, hh:mm:ss AM`, or [`INVALID_DATE`].
pub fn display_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(when) => when.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::warn!(raw, "unparseable timestamp");
            INVALID_DATE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_keep_their_wall_clock() {
        assert_eq!(
            display_timestamp("2025-03-04T09:15:07.123456"),
            "03/04/2025, 09:15:07 AM"
        );
        assert_eq!(display_timestamp("2025-03-04T21:05:00"), "03/04/2025, 09:05:00 PM");
        assert_eq!(display_timestamp("2025-03-04 13:00:00"), "03/04/2025, 01:00:00 PM");
    }

    #[test]
    fn date_only_values_are_midnight() {
        assert_eq!(display_timestamp("2025-12-31"), "12/31/2025, 12:00:00 AM");
    }

    #[test]
    fn offset_timestamps_parse() {
        assert!(parse_timestamp("2025-03-04T09:15:07Z").is_some());
        assert!(parse_timestamp("2025-03-04T09:15:07.5+05:30").is_some());
        assert_ne!(display_timestamp("2025-03-04T09:15:07+00:00"), INVALID_DATE);
    }

    #[test]
    fn garbage_degrades_to_placeholder() {
        assert_eq!(display_timestamp(""), INVALID_DATE);
        assert_eq!(display_timestamp("yesterday"), INVALID_DATE);
        assert_eq!(display_timestamp("2025-13-45T99:00:00"), INVALID_DATE);
    }
}
