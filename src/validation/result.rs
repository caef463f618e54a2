//! Validation result types.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a single validation call.
///
/// Built fresh by every validator and owned by the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when `errors` is empty.
    pub valid: bool,

    /// Every problem found, in the order checks ran.
    pub errors: Vec<String>,

    /// Snapshot of the file, for file validations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
}

impl ValidationResult {
    /// Build a result from accumulated errors.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            file_info: None,
        }
    }

    /// Attach a file snapshot.
    #[must_use]
    pub fn with_file_info(mut self, info: FileInfo) -> Self {
        self.file_info = Some(info);
        self
    }
}

/// Read-only snapshot of an uploaded file at validation time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileInfo {
    /// Size in bytes.
    pub size: u64,

    /// Lowercased extension including the leading dot (`.pdf`), or empty.
    pub extension: String,

    /// File name without directories.
    pub name: String,

    /// Path as given by the caller.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_is_valid() {
        let result = ValidationResult::from_errors(Vec::new());
        assert!(result.valid);
        assert!(result.file_info.is_none());
    }

    #[test]
    fn any_error_is_invalid() {
        let result = ValidationResult::from_errors(vec!["File is empty".to_string()]);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn serializes_without_missing_file_info() {
        let json = serde_json::to_string(&ValidationResult::from_errors(Vec::new())).unwrap();
        assert_eq!(json, r#"{"valid":true,"errors":[]}"#);
    }
}
