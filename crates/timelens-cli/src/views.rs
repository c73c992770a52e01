//! Report views: each pairs a query with its table rendering.

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use timelens_storage::{windows, AppRow, Database};

use crate::format::{format_date, format_duration, truncate_chars};
use crate::table::print_table;

/// Display truncation limits, in characters.
const NAME_WIDTH: usize = 30;
const EXECUTABLE_WIDTH: usize = 20;
const CATEGORY_WIDTH: usize = 15;
const SESSION_NAME_WIDTH: usize = 35;

const APP_HEADERS: [&str; 6] = ["Name", "Executable", "Category", "Time", "Launches", "Last Used"];

/// Today's totals and top apps, the direct-mode report.
pub fn today_report(db: &Database) -> Result<()> {
    let now = Local::now();
    let (start_ms, end_ms) = windows::local_day_window(now, 0);

    println!("Calculating time for: {}", now.format("%Y-%m-%d"));
    println!("Time range: 00:00:00 to {}\n", now.format("%H:%M:%S"));

    let summary = db.today_summary(start_ms, end_ms)?;
    let seconds = summary.total_ms / 1000;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    println!("{}", "=".repeat(50));
    println!("TODAY'S STATISTICS");
    println!("{}", "=".repeat(50));
    println!("Apps used:        {}", summary.app_count);
    println!("Sessions:         {}", summary.session_count);
    println!("Total time:       {hours}h {minutes}m {secs}s");
    println!("Total (ms):       {}", summary.total_ms);
    println!("{}", "=".repeat(50));

    println!("\nTop apps today:\n");
    for app in db.top_apps_between(start_ms, end_ms, 10)? {
        let app_seconds = app.total_ms / 1000;
        let app_hours = app_seconds / 3600;
        let app_minutes = (app_seconds % 3600) / 60;
        println!(
            "  {:<30} {app_hours}h {app_minutes}m ({} sessions)",
            truncate_chars(&app.name, NAME_WIDTH),
            app.session_count
        );
    }
    Ok(())
}

/// List tracked apps, optionally filtered by category or limited.
pub fn view_apps(db: &Database, category: Option<&str>, limit: Option<u32>) -> Result<()> {
    match category {
        Some(name) => println!("\nApps in '{name}' category:\n"),
        None => println!("\nAll Tracked Apps:\n"),
    }

    let apps = db.list_apps(category, limit)?;
    if apps.is_empty() {
        println!("  No apps found");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = apps.iter().map(app_row).collect();
    print_table(&APP_HEADERS, &rows);
    println!("\n  Total: {} apps", apps.len());
    Ok(())
}

/// Every category with its app count and summed tracked time.
pub fn view_categories(db: &Database) -> Result<()> {
    println!("\nCategories:\n");

    let rows: Vec<Vec<String>> = db
        .categories_with_usage()?
        .iter()
        .map(|cat| {
            vec![
                cat.icon.clone().unwrap_or_else(|| "-".to_string()),
                cat.name.clone(),
                cat.color.clone(),
                cat.app_count.to_string(),
                format_duration(cat.total_time_ms.unwrap_or(0)),
            ]
        })
        .collect();
    print_table(&["", "Category", "Color", "Apps", "Total Time"], &rows);
    Ok(())
}

/// The most recent completed sessions.
pub fn view_recent_sessions(db: &Database, limit: u32) -> Result<()> {
    println!("\nRecent Sessions (last {limit}):\n");

    let rows: Vec<Vec<String>> = db
        .recent_sessions(limit)?
        .iter()
        .map(|session| {
            vec![
                truncate_chars(&session.app_name, SESSION_NAME_WIDTH),
                format_date(Some(session.start_ms)),
                format_date(session.end_ms),
                format_duration(session.duration_ms.unwrap_or(0)),
            ]
        })
        .collect();
    print_table(&["App", "Started", "Ended", "Duration"], &rows);
    Ok(())
}

/// Whole-database statistics plus the trailing week.
pub fn view_stats(db: &Database) -> Result<()> {
    println!("\nOverall Statistics:\n");

    let stats = db.overall_stats(Local::now().timestamp_millis())?;
    println!("  Total Apps Tracked: {}", stats.app_count);
    println!("  Total Time Tracked: {}", format_duration(stats.total_time_ms));
    println!("  Completed Sessions: {}", stats.completed_sessions);
    println!("  Active Sessions: {}", stats.active_sessions);
    if let Some(top) = &stats.most_used {
        println!(
            "  Most Used App: {} ({})",
            top.name,
            format_duration(top.total_time_ms)
        );
    }

    println!("\n  Last 7 Days: {}", format_duration(stats.week_total_ms));

    println!("\n  Top 5 Apps This Week:\n");
    for (i, app) in stats.week_top.iter().enumerate() {
        println!("    {}. {}: {}", i + 1, app.name, format_duration(app.total_ms));
    }
    Ok(())
}

/// One row per trailing day, today first.
pub fn view_daily_breakdown(db: &Database, days: u32) -> Result<()> {
    println!("\nDaily Breakdown (Last {days} days):\n");

    let now = Local::now();
    let mut rows = Vec::new();
    for back in 0..days {
        let (start_ms, end_ms) = windows::local_day_window(now, back);
        let usage = db.day_usage(start_ms, end_ms)?;
        let day = now - Duration::days(i64::from(back));
        rows.push(vec![
            day.format("%Y-%m-%d").to_string(),
            day_label(back, day),
            format_duration(usage.total_ms),
            usage.session_count.to_string(),
        ]);
    }
    print_table(&["Date", "Day", "Time", "Sessions"], &rows);
    Ok(())
}

/// Apps matching a case-insensitive substring of name or executable.
pub fn search_apps(db: &Database, term: &str) -> Result<()> {
    println!("\nSearch results for '{term}':\n");

    let apps = db.search_apps(term)?;
    if apps.is_empty() {
        println!("  No apps found");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = apps.iter().map(app_row).collect();
    print_table(&APP_HEADERS, &rows);
    Ok(())
}

/// Day-bucket label: today and yesterday by name, then the weekday.
fn day_label(back: u32, day: DateTime<Local>) -> String {
    match back {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => day.format("%A").to_string(),
    }
}

fn app_row(app: &AppRow) -> Vec<String> {
    vec![
        truncate_chars(&app.name, NAME_WIDTH),
        truncate_chars(&app.executable, EXECUTABLE_WIDTH),
        truncate_chars(&app.category, CATEGORY_WIDTH),
        format_duration(app.total_time_ms),
        app.launch_count.to_string(),
        format_date(app.last_used_ms),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn yesterday_at(hour: u32, minute: u32) -> i64 {
        let day = (Local::now() - Duration::days(1)).date_naive();
        let dt = day.and_hms_opt(hour, minute, 0).unwrap();
        Local
            .from_local_datetime(&dt)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_day_labels_today_yesterday_then_weekday() {
        // 2025-06-15 is a Sunday.
        let now = Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(day_label(0, now), "Today");
        assert_eq!(day_label(1, now - Duration::days(1)), "Yesterday");
        assert_eq!(day_label(2, now - Duration::days(2)), "Friday");
        assert_eq!(day_label(6, now - Duration::days(6)), "Monday");
    }

    #[test]
    fn test_app_row_formats_duration_count_and_date() {
        let app = AppRow {
            name: "Game A".to_string(),
            executable: "game_a.exe".to_string(),
            category: "games".to_string(),
            total_time_ms: 5_400_000,
            launch_count: 3,
            last_used_ms: Some(yesterday_at(10, 0)),
        };

        let row = app_row(&app);
        assert_eq!(row[0], "Game A");
        assert_eq!(row[3], "1h 30m");
        assert_eq!(row[4], "3");
        assert_eq!(row[5], "Yesterday 10:00");
    }

    #[test]
    fn test_app_row_truncates_long_fields_without_ellipsis() {
        let app = AppRow {
            name: "A".repeat(40),
            executable: "b".repeat(25),
            category: "c".repeat(20),
            total_time_ms: 0,
            launch_count: 0,
            last_used_ms: None,
        };

        let row = app_row(&app);
        assert_eq!(row[0], "A".repeat(30));
        assert_eq!(row[1], "b".repeat(20));
        assert_eq!(row[2], "c".repeat(15));
        assert_eq!(row[3], "0s");
        assert_eq!(row[5], "Never");
    }

    #[test]
    fn test_app_rows_through_fixture_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("time-tracker.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE apps (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                executable TEXT NOT NULL,
                category TEXT,
                total_time INTEGER NOT NULL DEFAULT 0,
                launch_count INTEGER NOT NULL DEFAULT 0,
                last_used INTEGER,
                hidden INTEGER NOT NULL DEFAULT 0
            );",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO apps (name, executable, category, total_time, launch_count, last_used, hidden)
             VALUES ('Game A', 'game_a.exe', 'games', 5400000, 3, ?1, 0)",
            [yesterday_at(10, 0)],
        )
        .unwrap();
        drop(conn);

        let db = Database::open(&path).unwrap();
        let apps = db.list_apps(None, None).unwrap();
        assert_eq!(apps.len(), 1);

        let row = app_row(&apps[0]);
        assert_eq!(row, vec!["Game A", "game_a.exe", "games", "1h 30m", "3", "Yesterday 10:00"]);
    }
}
