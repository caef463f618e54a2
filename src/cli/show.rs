//! `jobsniper show` command implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::HistoryStore;

/// Run the show command.
///
/// Prints one analysis record as JSON.
///
/// # Errors
///
/// Returns an error if the record is not found or output cannot be
/// written.
pub fn run(config: &Config, id: i64) -> Result<()> {
    let store = HistoryStore::sqlite(&config.storage.path);
    let record = store.get_record(id).ok_or(Error::RecordNotFound(id))?;
    super::write_json(&record)
}
