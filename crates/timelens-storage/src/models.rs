use serde::{Deserialize, Serialize};

/// One tracked application as the external tracker records it.
///
/// `total_time_ms` is maintained by the tracker and is not recomputed from
/// sessions; the two figures are reported from their own sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRow {
    pub name: String,
    pub executable: String,
    pub category: String,
    pub total_time_ms: i64,
    pub launch_count: i64,
    pub last_used_ms: Option<i64>,
}

/// A category joined to the usage of its non-hidden apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub app_count: i64,
    pub total_time_ms: Option<i64>,
}

/// A completed session joined to its app name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    pub app_name: String,
    pub start_ms: i64,
    pub end_ms: Option<i64>,
    pub duration_ms: Option<i64>,
}

/// Aggregate totals for one local day, counting distinct apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodaySummary {
    pub app_count: i64,
    pub session_count: i64,
    pub total_ms: i64,
}

/// Per-app summed session time inside a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUsage {
    pub name: String,
    pub total_ms: i64,
    pub session_count: i64,
}

/// Summed duration and completed-session count for one day bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayUsage {
    pub total_ms: i64,
    pub session_count: i64,
}

/// The app with the largest tracker-maintained total time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppTotal {
    pub name: String,
    pub total_time_ms: i64,
}

/// Whole-database statistics plus the trailing seven-day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStats {
    pub app_count: i64,
    pub total_time_ms: i64,
    pub completed_sessions: i64,
    pub active_sessions: i64,
    pub most_used: Option<AppTotal>,
    pub week_total_ms: i64,
    pub week_top: Vec<AppUsage>,
}
