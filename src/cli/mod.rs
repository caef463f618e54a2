//! CLI command implementations.

pub mod history;
pub mod init;
pub mod interactions;
pub mod record;
pub mod sanitize;
pub mod show;
pub mod status;
pub mod validate;

use crate::error::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Write a serializable value as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut out = io::stdout().lock();
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Shorten `text` to its first line and at most `max` characters.
fn preview(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or(text);
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(100);
        let short = preview(&long, 20);
        assert_eq!(short.len(), 23);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn preview_takes_first_line() {
        assert_eq!(preview("first line\nsecond line", 50), "first line");
    }

    #[test]
    fn preview_counts_chars() {
        assert_eq!(preview("ééé", 2), "éé...");
    }
}
