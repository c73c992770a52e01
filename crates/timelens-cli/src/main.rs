mod format;
mod menu;
mod table;
mod views;

use anyhow::Result;
use clap::Parser;
use timelens_storage::{locator, Database};

/// Inspect the usage tracker's database: apps, sessions, and statistics.
#[derive(Parser)]
#[command(name = "timelens", about = "Viewer for tracked application usage", long_about = None)]
struct Cli {
    /// Print today's totals and exit
    #[arg(long)]
    today: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let Some(db_path) = locator::find_database() else {
        println!("Could not find database file!");
        println!("\nSearched for: time-tracker.db");
        println!("Please make sure the database exists in your project directory.");
        return Ok(());
    };

    println!("\nFound database: {}\n", db_path.display());

    let db = Database::open(&db_path)?;
    if cli.today {
        views::today_report(&db)
    } else {
        menu::run(&db)
    }
}
