//! `jobsniper sanitize` command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::validation::{sanitize_filename, sanitize_text};

/// Run the sanitize command.
///
/// Prints `input` after text or filename sanitizing.
///
/// # Errors
///
/// This command does not fail; the `Result` matches the other commands.
pub fn run(config: &Config, input: &str, filename: bool) -> Result<()> {
    println!("{}", apply(config, input, filename));
    Ok(())
}

fn apply(config: &Config, input: &str, filename: bool) -> String {
    if filename {
        sanitize_filename(input)
    } else {
        sanitize_text(input, config.sanitize.max_text_length)
    }
}
