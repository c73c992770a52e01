//! Read-only access to the usage tracker's SQLite database.
//!
//! The external tracker owns the schema (`apps`, `categories`, `sessions`)
//! and every write; this crate locates the database file and runs the
//! aggregate queries the reporting CLI renders.

pub mod db;
pub mod locator;
pub mod models;
pub mod windows;

pub use db::Database;
pub use models::{
    AppRow, AppTotal, AppUsage, CategoryUsage, DayUsage, OverallStats, SessionRow, TodaySummary,
};
