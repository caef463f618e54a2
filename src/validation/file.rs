//! Resume upload validation.

use crate::config::UploadConfig;
use crate::validation::result::{FileInfo, ValidationResult};
use crate::validation::sanitize::sanitize_filename;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Extensions accepted for resumes (lowercase, with dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

const PDF_MAGIC: &[u8] = b"%PDF";
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Checks uploaded resume files against an upload policy.
#[derive(Debug, Clone, Default)]
pub struct FileValidator {
    policy: UploadConfig,
}

impl FileValidator {
    /// Create a validator for the given policy.
    #[must_use]
    pub fn new(policy: UploadConfig) -> Self {
        Self { policy }
    }

    /// Validate the file at `path`.
    ///
    /// Every check runs; failures accumulate in `errors`. A missing or
    /// unreadable file is reported as an error, never as a panic or `Err`.
    #[must_use]
    pub fn validate_resume_file(&self, path: &Path) -> ValidationResult {
        let mut errors = Vec::new();
        let extension = lowercase_extension(path);

        let size = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            Ok(_) => {
                errors.push(format!("Not a regular file: {}", path.display()));
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                errors.push(format!("File not found: {}", path.display()));
                None
            }
            Err(e) => {
                errors.push(format!("Unable to read file: {e}"));
                None
            }
        };

        if let Some(size) = size {
            if size == 0 {
                errors.push("File is empty".to_string());
            }
            if size > self.policy.max_file_size {
                errors.push(format!(
                    "File too large: {size} bytes (maximum {} bytes)",
                    self.policy.max_file_size
                ));
            }
        }

        let extension_allowed = ALLOWED_EXTENSIONS.contains(&extension.as_str());
        if !extension_allowed {
            let shown = if extension.is_empty() { "none" } else { extension.as_str() };
            errors.push(format!(
                "Invalid file extension: {shown} (allowed: {})",
                ALLOWED_EXTENSIONS.join(", ")
            ));
        }

        if self.policy.sniff_content && extension_allowed && size.is_some_and(|s| s > 0) {
            match content_matches_extension(path, &extension) {
                Ok(true) => {}
                Ok(false) => errors.push("File content does not match its extension".to_string()),
                Err(e) => errors.push(format!("Unable to read file contents: {e}")),
            }
        }

        let result = ValidationResult::from_errors(errors);
        match size {
            Some(size) => result.with_file_info(FileInfo {
                size,
                extension,
                name: file_name(path),
                path: path.to_path_buf(),
            }),
            None => result,
        }
    }
}

/// Validate an upload with the configured policy.
///
/// Same as [`FileValidator::validate_resume_file`], except that
/// `file_info.name` carries the sanitized file name.
#[must_use]
pub fn validate_resume_upload(path: &Path, policy: &UploadConfig) -> ValidationResult {
    let mut result = FileValidator::new(policy.clone()).validate_resume_file(path);
    if let Some(info) = result.file_info.as_mut() {
        info.name = sanitize_filename(&info.name);
    }
    result
}

/// Lowercased extension with a leading dot, or empty if there is none.
fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compare the leading bytes of the file with the signature for `extension`.
fn content_matches_extension(path: &Path, extension: &str) -> io::Result<bool> {
    let magic = match extension {
        ".pdf" => PDF_MAGIC,
        ".doc" => OLE2_MAGIC,
        ".docx" => ZIP_MAGIC,
        _ => return Ok(false),
    };

    let mut head = Vec::with_capacity(magic.len());
    File::open(path)?
        .take(magic.len() as u64)
        .read_to_end(&mut head)?;

    Ok(head == magic)
}
