//! Configuration gating.
//!
//! Decides which AI providers and optional features a [`Config`] makes
//! usable. At least one AI provider is required; everything else only
//! switches features on or off.

use crate::config::Config;
use crate::validation::api_key::{validate_gemini_key, validate_mistral_key};
use crate::validation::email::validate_email_config;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Shortest session cookie key accepted.
pub const MIN_COOKIE_KEY_LENGTH: usize = 16;

/// Feature enabled by valid sender credentials.
pub const EMAIL_REPORTS_FEATURE: &str = "email_reports";

/// Feature enabled by a Firecrawl key.
pub const WEB_SCRAPING_FEATURE: &str = "web_scraping";

/// AI provider backing the analysis agents.
///
/// Ordering is priority order: Gemini is preferred over Mistral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Google Gemini.
    Gemini,

    /// Mistral AI.
    Mistral,
}

impl AiProvider {
    /// Lowercase provider name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`validate_config`].
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ConfigValidationResult {
    /// At least one provider and no hard errors.
    pub valid: bool,

    /// Hard errors, in the order found.
    pub errors: Vec<String>,

    /// Problems that only disable a provider or feature.
    pub warnings: Vec<String>,

    /// Providers with well-formed keys.
    pub ai_providers: BTreeSet<AiProvider>,

    /// Feature names that are switched on.
    pub features_enabled: BTreeSet<String>,
}

impl ConfigValidationResult {
    /// Provider the agents should use, or `None` for fallback mode.
    #[must_use]
    pub fn primary_provider(&self) -> Option<AiProvider> {
        self.ai_providers.first().copied()
    }

    /// Whether a named feature is switched on.
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features_enabled.contains(name)
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Classify which providers and features `config` makes usable.
#[must_use]
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::default();

    if let Some(key) = non_blank(config.providers.gemini_api_key.as_ref()) {
        if validate_gemini_key(Some(key)) {
            result.ai_providers.insert(AiProvider::Gemini);
        } else {
            result.warnings.push("Gemini API key has an invalid format".to_string());
        }
    }

    if let Some(key) = non_blank(config.providers.mistral_api_key.as_ref()) {
        if validate_mistral_key(Some(key)) {
            result.ai_providers.insert(AiProvider::Mistral);
        } else {
            result.warnings.push("Mistral API key has an invalid format".to_string());
        }
    }

    if result.ai_providers.is_empty() {
        result.errors.push("No valid AI providers configured".to_string());
    }

    let email = config.email.sender_email.as_deref();
    let password = config.email.sender_password.as_deref();
    if email.is_some() || password.is_some() {
        let check = validate_email_config(email.unwrap_or_default(), password.unwrap_or_default());
        if check.valid {
            result.features_enabled.insert(EMAIL_REPORTS_FEATURE.to_string());
        } else {
            result.warnings.extend(
                check
                    .errors
                    .into_iter()
                    .map(|e| format!("Email reports disabled: {e}")),
            );
        }
    }

    if non_blank(config.providers.firecrawl_api_key.as_ref()).is_some() {
        result.features_enabled.insert(WEB_SCRAPING_FEATURE.to_string());
    }

    if let Some(cookie_key) = config.cookie_key.as_deref() {
        if cookie_key.chars().count() < MIN_COOKIE_KEY_LENGTH {
            result.errors.push(format!(
                "Cookie key must be at least {MIN_COOKIE_KEY_LENGTH} characters"
            ));
        }
    }

    for (name, enabled) in &config.features {
        if *enabled {
            result.features_enabled.insert(name.clone());
        }
    }

    result.valid = !result.ai_providers.is_empty() && result.errors.is_empty();
    result
}
