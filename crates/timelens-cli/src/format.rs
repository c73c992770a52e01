//! Human-readable rendering of durations and timestamps.

use chrono::{DateTime, Duration, Local, TimeZone};

/// Format a millisecond duration as a compact string.
///
/// Under a minute only seconds are shown, under an hour minutes and
/// seconds, beyond that hours and minutes (seconds drop). Components
/// truncate rather than round; absent or zero input reads `0s`.
pub fn format_duration(ms: i64) -> String {
    if ms <= 0 {
        return "0s".to_string();
    }
    let seconds = ms / 1000;
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Format an epoch-millisecond timestamp relative to the current time.
pub fn format_date(ts_ms: Option<i64>) -> String {
    format_date_at(ts_ms, Local::now())
}

/// Relative date formatting against an explicit `now`.
///
/// Timestamps from today and yesterday get those words, the trailing seven
/// calendar days get a weekday name, everything else the full date. A
/// timestamp the local clock cannot represent reads `Unknown`.
pub fn format_date_at(ts_ms: Option<i64>, now: DateTime<Local>) -> String {
    let ts_ms = match ts_ms {
        None | Some(0) => return "Never".to_string(),
        Some(ts) => ts,
    };
    let Some(dt) = Local.timestamp_millis_opt(ts_ms).single() else {
        return "Unknown".to_string();
    };

    let time = dt.format("%H:%M");
    if dt.date_naive() == now.date_naive() {
        format!("Today {time}")
    } else if dt.date_naive() == (now - Duration::days(1)).date_naive() {
        format!("Yesterday {time}")
    } else if (now - dt).num_days() < 7 {
        dt.format("%A %H:%M").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Truncate to at most `max_chars` characters, multi-byte safe.
/// No ellipsis marker is added.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Local> {
        // A Sunday at noon, well away from any DST transition.
        Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn ms_at(now: DateTime<Local>, days_back: i64, hour: u32, minute: u32) -> i64 {
        let day = (now - Duration::days(days_back)).date_naive();
        let dt = day.and_hms_opt(hour, minute, 0).unwrap();
        Local.from_local_datetime(&dt).unwrap().timestamp_millis()
    }

    #[test]
    fn test_format_duration_zero_and_absent() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(-5), "0s");
    }

    #[test]
    fn test_format_duration_seconds_tier() {
        assert_eq!(format_duration(1_000), "1s");
        assert_eq!(format_duration(59_000), "59s");
        assert_eq!(format_duration(59_999), "59s");
    }

    #[test]
    fn test_format_duration_minutes_tier() {
        assert_eq!(format_duration(60_000), "1m 0s");
        assert_eq!(format_duration(90_500), "1m 30s");
        assert_eq!(format_duration(3_599_000), "59m 59s");
    }

    #[test]
    fn test_format_duration_hours_drop_seconds() {
        assert_eq!(format_duration(3_600_000), "1h 0m");
        assert_eq!(format_duration(3_661_000), "1h 1m");
        assert_eq!(format_duration(5_400_000), "1h 30m");
        assert_eq!(format_duration(90_000_000), "25h 0m");
    }

    #[test]
    fn test_format_date_absent_is_never() {
        assert_eq!(format_date_at(None, fixed_now()), "Never");
        assert_eq!(format_date_at(Some(0), fixed_now()), "Never");
    }

    #[test]
    fn test_format_date_unrepresentable_is_unknown() {
        assert_eq!(format_date_at(Some(i64::MAX), fixed_now()), "Unknown");
        assert_eq!(format_date_at(Some(i64::MIN), fixed_now()), "Unknown");
    }

    #[test]
    fn test_format_date_today() {
        let now = fixed_now();
        assert_eq!(
            format_date_at(Some(now.timestamp_millis()), now),
            "Today 12:00"
        );
        assert_eq!(format_date_at(Some(ms_at(now, 0, 8, 5)), now), "Today 08:05");
    }

    #[test]
    fn test_format_date_yesterday() {
        let now = fixed_now();
        assert_eq!(
            format_date_at(Some(ms_at(now, 1, 10, 0)), now),
            "Yesterday 10:00"
        );
    }

    #[test]
    fn test_format_date_weekday_within_seven_days() {
        let now = fixed_now();
        // 2025-06-15 is a Sunday, so three days back is Thursday.
        assert_eq!(
            format_date_at(Some(ms_at(now, 3, 10, 30)), now),
            "Thursday 10:30"
        );
    }

    #[test]
    fn test_format_date_absolute_beyond_seven_days() {
        let now = fixed_now();
        assert_eq!(
            format_date_at(Some(ms_at(now, 10, 9, 15)), now),
            "2025-06-05 09:15"
        );
        // Exactly seven days back falls out of the weekday tier.
        assert_eq!(
            format_date_at(Some(ms_at(now, 7, 12, 0)), now),
            "2025-06-08 12:00"
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("\u{4f60}\u{597d}\u{4e16}\u{754c}", 2), "\u{4f60}\u{597d}");
    }
}
