//! Read-only query layer over the tracker database.
//!
//! Every query is parameterized; no user data is interpolated into SQL.
//! Null aggregate sums read as zero.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::models::{
    AppRow, AppTotal, AppUsage, CategoryUsage, DayUsage, OverallStats, SessionRow, TodaySummary,
};
use crate::windows::DAY_MS;

/// Read-only connection to a tracker database.
///
/// The tracker owns the schema and all writes; this wrapper only issues
/// `SELECT` statements. The connection closes when the value drops.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened as a SQLite database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

        log::info!("Opened database read-only: {}", path.display());
        Ok(Self { conn })
    }

    /// Distinct-app count, completed-session count, and summed duration for
    /// sessions starting in `[start_ms, end_ms)` with positive duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn today_summary(&self, start_ms: i64, end_ms: i64) -> Result<TodaySummary> {
        let summary = self.conn.query_row(
            "SELECT COUNT(DISTINCT app_id), COUNT(*), SUM(duration)
             FROM sessions
             WHERE start_time >= ?1
               AND start_time < ?2
               AND end_time IS NOT NULL
               AND duration > 0",
            params![start_ms, end_ms],
            |row| {
                Ok(TodaySummary {
                    app_count: row.get(0)?,
                    session_count: row.get(1)?,
                    total_ms: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                })
            },
        )?;
        Ok(summary)
    }

    /// Top apps by summed session duration for sessions starting in
    /// `[start_ms, end_ms)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn top_apps_between(
        &self,
        start_ms: i64,
        end_ms: i64,
        limit: u32,
    ) -> Result<Vec<AppUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.name, SUM(s.duration) AS total, COUNT(s.id)
             FROM sessions s
             JOIN apps a ON s.app_id = a.id
             WHERE s.start_time >= ?1
               AND s.start_time < ?2
               AND s.end_time IS NOT NULL
             GROUP BY a.id
             ORDER BY total DESC
             LIMIT ?3",
        )?;

        let apps = stmt
            .query_map(params![start_ms, end_ms, limit], Self::row_to_app_usage)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(apps)
    }

    /// Top apps by summed session duration for sessions starting at or after
    /// `start_ms`, used by the trailing-window statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn top_apps_since(&self, start_ms: i64, limit: u32) -> Result<Vec<AppUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.name, SUM(s.duration) AS total, COUNT(s.id)
             FROM sessions s
             JOIN apps a ON s.app_id = a.id
             WHERE s.start_time >= ?1 AND s.end_time IS NOT NULL
             GROUP BY a.id
             ORDER BY total DESC
             LIMIT ?2",
        )?;

        let apps = stmt
            .query_map(params![start_ms, limit], Self::row_to_app_usage)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(apps)
    }

    /// Non-hidden apps ordered by descending total time, with an optional
    /// exact-match category filter and an optional row limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_apps(&self, category: Option<&str>, limit: Option<u32>) -> Result<Vec<AppRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, executable, category, total_time, launch_count, last_used
             FROM apps
             WHERE hidden = 0 AND (?1 IS NULL OR category = ?1)
             ORDER BY total_time DESC
             LIMIT ?2",
        )?;

        // SQLite treats a negative limit as "no limit".
        let limit = limit.map_or(-1, i64::from);
        let apps = stmt
            .query_map(params![category, limit], Self::row_to_app)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(apps)
    }

    /// Every category joined to the usage of its non-hidden apps, default
    /// category first, then alphabetical.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn categories_with_usage(&self) -> Result<Vec<CategoryUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, c.color, c.icon, COUNT(a.id), SUM(a.total_time)
             FROM categories c
             LEFT JOIN apps a ON c.id = a.category AND a.hidden = 0
             GROUP BY c.id
             ORDER BY c.is_default DESC, c.name",
        )?;

        let categories = stmt
            .query_map([], |row| {
                Ok(CategoryUsage {
                    name: row.get(0)?,
                    color: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    icon: row.get(2)?,
                    app_count: row.get(3)?,
                    total_time_ms: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// The most recent `limit` completed sessions joined to their app name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn recent_sessions(&self, limit: u32) -> Result<Vec<SessionRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.name, s.start_time, s.end_time, s.duration
             FROM sessions s
             JOIN apps a ON s.app_id = a.id
             WHERE s.end_time IS NOT NULL
             ORDER BY s.start_time DESC
             LIMIT ?1",
        )?;

        let sessions = stmt
            .query_map(params![limit], |row| {
                Ok(SessionRow {
                    app_name: row.get(0)?,
                    start_ms: row.get(1)?,
                    end_ms: row.get(2)?,
                    duration_ms: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    /// Whole-database statistics plus the trailing seven-day window ending
    /// at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the underlying queries fail.
    pub fn overall_stats(&self, now_ms: i64) -> Result<OverallStats> {
        let app_count = self
            .conn
            .query_row("SELECT COUNT(*) FROM apps WHERE hidden = 0", [], |row| {
                row.get(0)
            })?;

        let total_time_ms = self
            .conn
            .query_row("SELECT SUM(total_time) FROM apps WHERE hidden = 0", [], |row| {
                row.get::<_, Option<i64>>(0)
            })?
            .unwrap_or(0);

        let completed_sessions = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE end_time IS NOT NULL",
            [],
            |row| row.get(0),
        )?;

        let active_sessions = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE end_time IS NULL",
            [],
            |row| row.get(0),
        )?;

        let most_used = self
            .conn
            .query_row(
                "SELECT name, total_time
                 FROM apps
                 WHERE hidden = 0
                 ORDER BY total_time DESC
                 LIMIT 1",
                [],
                |row| {
                    Ok(AppTotal {
                        name: row.get(0)?,
                        total_time_ms: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                    })
                },
            )
            .optional()?;

        let week_start = now_ms - 7 * DAY_MS;
        let week_total_ms = self
            .conn
            .query_row(
                "SELECT SUM(duration)
                 FROM sessions
                 WHERE start_time >= ?1 AND end_time IS NOT NULL",
                params![week_start],
                |row| row.get::<_, Option<i64>>(0),
            )?
            .unwrap_or(0);

        let week_top = self.top_apps_since(week_start, 5)?;

        Ok(OverallStats {
            app_count,
            total_time_ms,
            completed_sessions,
            active_sessions,
            most_used,
            week_total_ms,
            week_top,
        })
    }

    /// Summed duration and completed-session count for one day bucket
    /// `[start_ms, end_ms)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn day_usage(&self, start_ms: i64, end_ms: i64) -> Result<DayUsage> {
        let usage = self.conn.query_row(
            "SELECT SUM(duration), COUNT(*)
             FROM sessions
             WHERE start_time >= ?1
               AND start_time < ?2
               AND end_time IS NOT NULL",
            params![start_ms, end_ms],
            |row| {
                Ok(DayUsage {
                    total_ms: row.get::<_, Option<i64>>(0)?.unwrap_or(0),
                    session_count: row.get(1)?,
                })
            },
        )?;
        Ok(usage)
    }

    /// Case-insensitive substring search against app name or executable,
    /// non-hidden only, ordered by descending total time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_apps(&self, term: &str) -> Result<Vec<AppRow>> {
        let pattern = format!("%{term}%");
        let mut stmt = self.conn.prepare(
            "SELECT name, executable, category, total_time, launch_count, last_used
             FROM apps
             WHERE (name LIKE ?1 OR executable LIKE ?1) AND hidden = 0
             ORDER BY total_time DESC",
        )?;

        let apps = stmt
            .query_map(params![pattern], Self::row_to_app)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(apps)
    }

    fn row_to_app(row: &rusqlite::Row) -> rusqlite::Result<AppRow> {
        Ok(AppRow {
            name: row.get(0)?,
            executable: row.get(1)?,
            category: row.get(2)?,
            total_time_ms: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            launch_count: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
            last_used_ms: row.get(5)?,
        })
    }

    fn row_to_app_usage(row: &rusqlite::Row) -> rusqlite::Result<AppUsage> {
        Ok(AppUsage {
            name: row.get(0)?,
            total_ms: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
            session_count: row.get(2)?,
        })
    }
}
