//! `jobsniper history` command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::storage::history::DEFAULT_HISTORY_LIMIT;
use crate::storage::{HistoryStore, ResumeLogRecord};
use chrono::{DateTime, Local};

/// Maximum width for name and job title columns.
const COLUMN_PREVIEW_LEN: usize = 24;

/// Run the history command.
///
/// Shows the most recent analyses, newest first.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run(config: &Config, limit: Option<usize>) -> Result<()> {
    let store = HistoryStore::sqlite(&config.storage.path);
    let records = store.get_history(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));

    if records.is_empty() {
        println!("No analyses recorded.");
        println!("\nHistory is stored in: {}", config.storage.path.display());
        return Ok(());
    }

    println!(
        "{:>5} {:<17} {:<27} {:>5}  Job Title",
        "ID", "When", "Name", "Match"
    );
    println!("{}", "─".repeat(90));

    for record in &records {
        println!("{}", format_row(record));
    }

    println!("{}", "─".repeat(90));
    println!("Showing {} analysis record(s)", records.len());

    Ok(())
}

fn format_row(record: &ResumeLogRecord) -> String {
    format!(
        "{:>5} {:<17} {:<27} {:>4}%  {}",
        record.id,
        format_local_time(&record.timestamp),
        super::preview(&record.name, COLUMN_PREVIEW_LEN),
        record.match_percent,
        super::preview(&record.job_title, COLUMN_PREVIEW_LEN),
    )
}

/// Format a stored RFC 3339 timestamp in local time.
///
/// Timestamps that don't parse are shown as stored.
pub(crate) fn format_local_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}
