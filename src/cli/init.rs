//! `jobsniper init` command implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::HistoryStore;

/// Run the init command.
///
/// Creates the history tables. Running it again is harmless.
///
/// # Errors
///
/// Returns an error if the schema could not be created.
pub fn run(config: &Config) -> Result<()> {
    let store = HistoryStore::sqlite(&config.storage.path);

    if store.init() {
        println!("History database ready: {}", config.storage.path.display());
        Ok(())
    } else {
        Err(Error::Config(format!(
            "could not initialize history database at {}",
            config.storage.path.display()
        )))
    }
}
