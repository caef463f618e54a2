//! Input validation and configuration gating.
//!
//! Every validator is a pure function of its arguments. Problems are
//! reported as human-readable strings on a result value, never as `Err`.

pub mod api_key;
pub mod config;
pub mod email;
pub mod file;
pub mod result;
pub mod sanitize;

pub use api_key::{ApiKeyReport, validate_api_keys, validate_gemini_key, validate_mistral_key};
pub use config::{AiProvider, ConfigValidationResult, validate_config};
pub use email::{validate_email_address, validate_email_config};
pub use file::{FileValidator, validate_resume_upload};
pub use result::{FileInfo, ValidationResult};
pub use sanitize::{sanitize_filename, sanitize_text};
