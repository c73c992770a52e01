//! Local-time window computation for date-bucketed queries.
//!
//! All bounds are half-open `[start, end)` in epoch milliseconds, derived
//! from local wall-clock time.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Bounds of the local calendar day `days_back` days before `now`
/// (0 = today). The end bound is always `start + 24h`.
pub fn local_day_window(now: DateTime<Local>, days_back: u32) -> (i64, i64) {
    let day = now - Duration::days(i64::from(days_back));
    let midnight = day.date_naive().and_time(NaiveTime::MIN);
    let start = match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        // Midnight skipped by a DST jump; the UTC projection is close
        // enough for bucketing.
        None => midnight.and_utc().timestamp_millis(),
    };
    (start, start + DAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_window_spans_exactly_one_day() {
        let now = Local::now();
        for back in 0..10 {
            let (start, end) = local_day_window(now, back);
            assert_eq!(end - start, DAY_MS);
        }
    }

    #[test]
    fn test_today_window_contains_now() {
        let now = Local::now();
        let (start, end) = local_day_window(now, 0);
        let now_ms = now.timestamp_millis();
        assert!(start <= now_ms);
        assert!(now_ms < end);
    }

    #[test]
    fn test_windows_step_backward() {
        let now = Local::now();
        let (today_start, _) = local_day_window(now, 0);
        let (yesterday_start, _) = local_day_window(now, 1);
        assert!(yesterday_start < today_start);
    }
}
