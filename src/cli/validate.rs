//! `jobsniper validate` command implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::validation::{ValidationResult, validate_resume_upload};
use std::path::Path;

/// Run the validate command.
///
/// Checks an uploaded resume against the configured upload policy and
/// prints every problem found.
///
/// # Errors
///
/// Returns an error if the file fails validation or output cannot be
/// written.
pub fn run(config: &Config, path: &Path, json: bool) -> Result<()> {
    let result = validate_resume_upload(path, &config.upload);

    if json {
        super::write_json(&result)?;
    } else {
        print!("{}", render(&result));
    }

    if result.valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{} failed validation",
            path.display()
        )))
    }
}

fn render(result: &ValidationResult) -> String {
    let mut out = String::new();

    if let Some(info) = &result.file_info {
        out.push_str(&format!("File:      {}\n", info.name));
        out.push_str(&format!("Size:      {} bytes\n", info.size));
        let kind = if info.extension.is_empty() {
            "(none)".to_string()
        } else {
            info.extension.trim_start_matches('.').to_uppercase()
        };
        out.push_str(&format!("Type:      {kind}\n"));
    }

    if result.valid {
        out.push_str("Status:    OK\n");
    } else {
        out.push_str("Status:    REJECTED\n");
        for error in &result.errors {
            out.push_str(&format!("  - {error}\n"));
        }
    }

    out
}
