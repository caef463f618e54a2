//! `jobsniper record` command implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{AnalysisReport, HistoryStore};
use std::fs;
use std::path::Path;

/// Run the record command.
///
/// Reads an analysis report (JSON) and appends it to the history.
///
/// # Errors
///
/// Returns an error if the report cannot be read or parsed, or if the
/// history store did not accept it.
pub fn run(config: &Config, report_path: &Path, filename: Option<&str>) -> Result<()> {
    let contents = fs::read_to_string(report_path)?;
    let report: AnalysisReport = serde_json::from_str(&contents)?;

    let filename = filename.map_or_else(
        || report_path.display().to_string(),
        ToString::to_string,
    );

    let store = HistoryStore::sqlite(&config.storage.path);
    match store.log_analysis(&report, &filename) {
        Some(id) => {
            println!("Recorded analysis #{id} for {filename}");
            Ok(())
        }
        None => Err(Error::Config(format!(
            "history database at {} is unavailable",
            config.storage.path.display()
        ))),
    }
}
