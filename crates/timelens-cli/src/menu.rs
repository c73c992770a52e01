//! The interactive menu loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use timelens_storage::Database;

use crate::views;

const DEFAULT_SESSION_COUNT: u32 = 20;
const DEFAULT_DAY_COUNT: u32 = 7;

/// Run the menu loop until the user quits or stdin closes.
///
/// Unparsable numeric input falls back to the documented default and is
/// never surfaced as an error; query failures propagate.
///
/// # Errors
///
/// Returns an error if a query or terminal write fails.
#[allow(clippy::cognitive_complexity)]
pub fn run(db: &Database) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "  Choose an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => views::view_apps(db, None, None)?,
            "2" => views::view_apps(db, None, Some(10))?,
            "3" => {
                views::view_categories(db)?;
                let Some(category) = prompt(&mut input, "\n  Enter category name: ")? else {
                    break;
                };
                if !category.is_empty() {
                    views::view_apps(db, Some(&category), None)?;
                }
            }
            "4" => views::view_categories(db)?,
            "5" => {
                let Some(raw) = prompt(&mut input, "  How many sessions? (default 20): ")? else {
                    break;
                };
                let limit = parse_count(&raw, DEFAULT_SESSION_COUNT);
                views::view_recent_sessions(db, limit)?;
            }
            "6" => views::view_stats(db)?,
            "7" => {
                let Some(raw) = prompt(&mut input, "  How many days? (default 7): ")? else {
                    break;
                };
                let days = parse_count(&raw, DEFAULT_DAY_COUNT);
                views::view_daily_breakdown(db, days)?;
            }
            "8" => {
                let Some(term) = prompt(&mut input, "  Enter search term: ")? else {
                    break;
                };
                if !term.is_empty() {
                    views::search_apps(db, &term)?;
                }
            }
            "q" | "Q" => {
                println!("\n  Goodbye!\n");
                break;
            }
            _ => println!("\n  Invalid option!"),
        }

        if prompt(&mut input, "\n  Press Enter to continue...")?.is_none() {
            break;
        }
    }

    Ok(())
}

fn print_menu() {
    println!("\n{}", "=".repeat(60));
    println!("  TIME TRACKER - DATABASE VIEWER");
    println!("{}", "=".repeat(60));
    println!("\n  Options:");
    println!("    1. View all apps");
    println!("    2. View top 10 apps");
    println!("    3. View apps by category");
    println!("    4. View categories");
    println!("    5. View recent sessions");
    println!("    6. View statistics");
    println!("    7. View daily breakdown");
    println!("    8. Search app by name");
    println!("    q. Quit");
    println!();
}

/// Parse a count prompt answer, substituting `default` for anything that
/// is empty or not a number.
fn parse_count(raw: &str, default: u32) -> u32 {
    raw.parse().unwrap_or_else(|_| {
        if !raw.is_empty() {
            log::debug!("unparsable count input {raw:?}, using default {default}");
        }
        default
    })
}

/// Print `message`, read one line, and return it trimmed.
/// `None` means stdin reached end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_numbers() {
        assert_eq!(parse_count("15", 20), 15);
        assert_eq!(parse_count("1", 7), 1);
    }

    #[test]
    fn test_parse_count_defaults_on_empty_or_garbage() {
        assert_eq!(parse_count("", 20), 20);
        assert_eq!(parse_count("abc", 20), 20);
        assert_eq!(parse_count("-3", 7), 7);
        assert_eq!(parse_count("2.5", 7), 7);
    }

    #[test]
    fn test_prompt_returns_trimmed_line() {
        let mut input = "  5  \n".as_bytes();
        let answer = prompt(&mut input, "").unwrap();
        assert_eq!(answer, Some("5".to_string()));
    }

    #[test]
    fn test_prompt_signals_end_of_input() {
        let mut input = "".as_bytes();
        assert_eq!(prompt(&mut input, "").unwrap(), None);
    }
}
