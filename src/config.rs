//! Configuration loading and management.
//!
//! Configuration is loaded once at startup with the following precedence:
//! 1. Environment variables (including entries from a local `.env`)
//! 2. Config file (`~/.jobsniper/config.toml`)
//! 3. Defaults
//!
//! The resulting [`Config`] is immutable and passed by reference to the
//! validators and the history store.

use crate::error::{Error, Result};
use crate::validation::{ValidationResult, validate_email_config};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local env file read before the environment.
pub const ENV_FILE: &str = ".env";

/// Default ceiling for uploaded resumes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default cap applied by the text sanitizer.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// AI and auxiliary provider credentials.
    pub providers: ProvidersConfig,

    /// Email report configuration.
    pub email: EmailConfig,

    /// History storage configuration.
    pub storage: StorageConfig,

    /// Upload policy.
    pub upload: UploadConfig,

    /// Sanitizer limits.
    pub sanitize: SanitizeConfig,

    /// Session cookie signing key.
    pub cookie_key: Option<String>,

    /// Pass-through feature flags.
    pub features: BTreeMap<String, bool>,
}

/// Provider credentials.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Google Gemini API key.
    pub gemini_api_key: Option<String>,

    /// Mistral API key.
    pub mistral_api_key: Option<String>,

    /// Firecrawl API key (web scraping).
    pub firecrawl_api_key: Option<String>,
}

/// Email report configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Sender address.
    pub sender_email: Option<String>,

    /// Sender app password.
    pub sender_password: Option<String>,

    /// SMTP host.
    pub smtp_server: String,

    /// SMTP port.
    pub smtp_port: u16,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_email: None,
            sender_password: None,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
        }
    }
}

/// History storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite history database.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_home().join("history.db"),
        }
    }
}

/// Upload policy for resume files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,

    /// Check leading magic bytes against the extension.
    pub sniff_content: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            sniff_content: false,
        }
    }
}

/// Sanitizer limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Maximum characters kept by `sanitize_text`.
    pub max_text_length: usize,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// Get the jobsniper home directory.
///
/// Uses `JOBSNIPER_HOME` if set, otherwise `~/.jobsniper`.
#[must_use]
pub fn default_home() -> PathBuf {
    if let Ok(home) = env::var("JOBSNIPER_HOME") {
        PathBuf::from(home)
    } else {
        dirs::home_dir().map_or_else(|| PathBuf::from(".jobsniper"), |h| h.join(".jobsniper"))
    }
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// A `.env` file in the working directory is read first so its entries
/// behave like real environment variables.
///
/// # Errors
///
/// Returns an error if `.env` exists but has a malformed line, or if the
/// config file exists but cannot be read or parsed.
pub fn load_config() -> Result<Config> {
    load_env_file(Path::new(ENV_FILE))?;

    let config_path = get_config_path();
    let mut config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        parse_config(&contents)?
    } else {
        Config::default()
    };

    apply_overrides(&mut config, |key| env::var(key).ok());

    Ok(config)
}

/// Read an env file into the process environment.
///
/// Variables already set are left alone. Returns `false` if the file does
/// not exist.
///
/// # Errors
///
/// Returns `Error::Config` naming the file if it cannot be read or a line
/// does not parse.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded env file");
            Ok(true)
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
    }
}

/// Store sender credentials in the env file at `path`.
///
/// The credentials are checked with [`validate_email_config`] first and
/// nothing is written unless they pass. Existing `SENDER_EMAIL` and
/// `SENDER_PASSWORD` lines are replaced in place; other lines are kept.
/// Reload the config afterwards to pick up the new values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn save_email_credentials(
    path: &Path,
    email: &str,
    password: &str,
) -> Result<ValidationResult> {
    let result = validate_email_config(email, password);
    if !result.valid {
        return Ok(result);
    }

    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();
    for (key, value) in [("SENDER_EMAIL", email), ("SENDER_PASSWORD", password)] {
        let entry = format!("{key}={}", quote_env_value(value));
        match lines.iter_mut().find(|line| env_line_key(line) == Some(key)) {
            Some(line) => *line = entry,
            None => lines.push(entry),
        }
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!(path = %path.display(), "saved sender credentials");

    Ok(result)
}

/// Key assigned by an env file line, if any.
fn env_line_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);
    line.split_once('=').map(|(key, _)| key.trim())
}

fn quote_env_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns `Error::Config` if the document is not valid TOML for [`Config`].
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("JOBSNIPER_CONFIG") {
        return PathBuf::from(path);
    }

    default_home().join("config.toml")
}

/// Apply environment overrides, reading values through `lookup`.
///
/// Blank values count as unset.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    // Providers
    if let Some(key) = get("GEMINI_API_KEY") {
        config.providers.gemini_api_key = Some(key);
    }
    if let Some(key) = get("MISTRAL_API_KEY") {
        config.providers.mistral_api_key = Some(key);
    }
    if let Some(key) = get("FIRECRAWL_API_KEY") {
        config.providers.firecrawl_api_key = Some(key);
    }

    // Email
    if let Some(email) = get("SENDER_EMAIL") {
        config.email.sender_email = Some(email);
    }
    if let Some(password) = get("SENDER_PASSWORD") {
        config.email.sender_password = Some(password);
    }
    if let Some(server) = get("SMTP_SERVER") {
        config.email.smtp_server = server;
    }
    if let Some(val) = get("SMTP_PORT") {
        if let Ok(port) = val.trim().parse() {
            config.email.smtp_port = port;
        }
    }

    if let Some(key) = get("COOKIE_KEY") {
        config.cookie_key = Some(key);
    }

    // Storage
    if let Some(path) = get("JOBSNIPER_DB_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Some(home) = get("JOBSNIPER_HOME") {
        config.storage.path = PathBuf::from(home).join("history.db");
    }

    // Features
    if let Some(list) = get("JOBSNIPER_FEATURES") {
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            config.features.insert(name.to_string(), true);
        }
    }
}
