//! Utility helpers shared across the chat client.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Current time as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2024-05-01T10:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `HH:MM` in local time, or the raw string when it does not parse.
pub fn format_time_label(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_iso_is_millisecond_utc() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-05-01T10:00:00.000Z".len());
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn time_label_formats_or_falls_back() {
        let label = format_time_label("2024-05-01T10:07:00.000Z");
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');

        assert_eq!(format_time_label("yesterday"), "yesterday");
    }
}
