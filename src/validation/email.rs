//! Email address and sender credential checks.

use crate::validation::result::ValidationResult;
use regex::Regex;
use std::sync::OnceLock;

/// Template address shipped in the sample `.env`.
pub const PLACEHOLDER_EMAIL: &str = "your_gmail@gmail.com";

/// Template password shipped in the sample `.env`.
pub const PLACEHOLDER_PASSWORD: &str = "your_app_password";

/// Shortest sender password accepted.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Check email address syntax.
///
/// Returns `(true, "")` on success or `(false, reason)`. Deliverability is
/// not checked.
#[must_use]
pub fn validate_email_address(address: &str) -> (bool, String) {
    if address.trim().is_empty() {
        return (false, "Email address is required".to_string());
    }

    if address.chars().any(char::is_whitespace) {
        return (false, "Email address must not contain spaces".to_string());
    }

    if email_regex().is_some_and(|re| re.is_match(address)) {
        (true, String::new())
    } else {
        (false, format!("Invalid email format: {address}"))
    }
}

/// Check sender credentials for email reports.
///
/// All problems are reported together.
#[must_use]
pub fn validate_email_config(email: &str, password: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if email == PLACEHOLDER_EMAIL {
        errors.push("Please replace the placeholder email address".to_string());
    } else {
        let (ok, reason) = validate_email_address(email);
        if !ok {
            errors.push(reason);
        }
    }

    if password == PLACEHOLDER_PASSWORD {
        errors.push("Please replace the placeholder app password".to_string());
    } else if password.trim().is_empty() {
        errors.push("App password is required".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "App password is too short (minimum {MIN_PASSWORD_LENGTH} characters)"
        ));
    }

    ValidationResult::from_errors(errors)
}
