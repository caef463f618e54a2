//! `jobsniper interactions` command implementation.

use crate::cli::history::format_local_time;
use crate::config::Config;
use crate::error::Result;
use crate::storage::history::DEFAULT_HISTORY_LIMIT;
use crate::storage::{AgentInteractionRecord, HistoryStore};

/// Maximum length for payload previews.
const PAYLOAD_PREVIEW_LEN: usize = 40;

/// Run the interactions command.
///
/// Shows the most recent agent interactions, newest first.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run(config: &Config, limit: Option<usize>) -> Result<()> {
    let store = HistoryStore::sqlite(&config.storage.path);
    let rows = store.get_interactions(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));

    if rows.is_empty() {
        println!("No agent interactions recorded.");
        return Ok(());
    }

    for row in &rows {
        println!("{}", format_entry(row));
    }
    println!("Showing {} interaction(s)", rows.len());

    Ok(())
}

fn format_entry(row: &AgentInteractionRecord) -> String {
    format!(
        "#{} {} {}::{}\n    in:  {}\n    out: {}",
        row.id,
        format_local_time(&row.timestamp),
        row.agent_name,
        row.action,
        super::preview(&row.input_data, PAYLOAD_PREVIEW_LEN),
        super::preview(&row.output_data, PAYLOAD_PREVIEW_LEN),
    )
}
