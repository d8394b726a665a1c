//! Small formatting helpers shared by every shell.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Post and comment timestamps for display: "Just now", "5h ago", "3d ago",
/// then the plain date once a week has passed.
///
/// The backend sends either RFC 3339 or a zone-less local timestamp (taken
/// as UTC). Anything unreadable is returned as is.
pub fn relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };
    let hours = (now - at).num_hours();
    match hours {
        h if h < 1 => "Just now".to_string(),
        h if h < 24 => format!("{h}h ago"),
        h if h < 168 => format!("{}d ago", h / 24),
        _ => at.format("%Y-%m-%d").to_string(),
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn within_the_hour() {
        assert_eq!(relative_time("2024-06-15T11:30:00Z", now()), "Just now");
        // Clock skew: a timestamp slightly in the future.
        assert_eq!(relative_time("2024-06-15T12:05:00Z", now()), "Just now");
    }

    #[test]
    fn hours_then_days() {
        assert_eq!(relative_time("2024-06-15T07:00:00Z", now()), "5h ago");
        assert_eq!(relative_time("2024-06-14T12:00:00Z", now()), "1d ago");
        assert_eq!(relative_time("2024-06-10T12:00:00Z", now()), "5d ago");
    }

    #[test]
    fn older_than_a_week_shows_date() {
        assert_eq!(relative_time("2024-06-08T12:00:00Z", now()), "2024-06-08");
    }

    #[test]
    fn zone_less_timestamp_is_utc() {
        assert_eq!(relative_time("2024-06-15T09:00:00", now()), "3h ago");
        // Hours are floored.
        assert_eq!(relative_time("2024-06-15T09:00:00.123456", now()), "2h ago");
    }

    #[test]
    fn unreadable_passes_through() {
        assert_eq!(relative_time("yesterday", now()), "yesterday");
    }
}
