// crates/biou-console-config/src/config.rs
// ============================================================================
// Module: Biou Console Configuration
// Description: Configuration loading and validation for the console client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dirs, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Resolution order is an explicit path, then [`CONFIG_ENV_VAR`], then
//! [`DEFAULT_CONFIG_NAME`] in the working directory. Only the default file may
//! be absent; it then yields built-in defaults. [`BASE_URL_ENV_VAR`] overrides
//! `api.base_url` after the file is read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "biou-console.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "BIOU_CONSOLE_CONFIG";
/// Environment variable used to override the API base URL.
pub const BASE_URL_ENV_VAR: &str = "BIOU_API_BASE_URL";
/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default cap on response body size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;
/// Maximum response body cap in bytes.
pub(crate) const MAX_RESPONSE_BYTES_LIMIT: usize = 1024 * 1024 * 1024;
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the base URL.
pub(crate) const MAX_BASE_URL_LENGTH: usize = 2048;
/// Maximum length of a locale tag.
pub(crate) const MAX_LOCALE_LENGTH: usize = 16;
/// Directory under the platform config dir holding console state.
const STATE_DIR_NAME: &str = "biou-console";
/// Session file name inside [`STATE_DIR_NAME`].
const SESSION_FILE_NAME: &str = "session.json";

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Biou console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Request log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Display settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl ConsoleConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| env::var(key).ok())
    }

    /// Loads configuration reading environment values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (resolved, required) = resolve_path(path, &lookup)?;
        validate_path(&resolved)?;
        let mut config = match fs::read(&resolved) {
            Ok(bytes) => Self::from_bytes(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound && !required => Self::default(),
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", resolved.display())));
            }
        };
        config.apply_env_overrides(&lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration bytes without validating them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the content is too large, not UTF-8, or
    /// not valid TOML for this model.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV_VAR).filter(|value| !value.trim().is_empty()) {
            self.api.base_url = base_url;
        }
    }

    /// Validates the configuration and normalizes the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Absolute base URL every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum accepted response body size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates API settings and strips trailing slashes from the base URL.
    fn validate(&mut self) -> Result<(), ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must be non-empty".to_string()));
        }
        if trimmed.len() > MAX_BASE_URL_LENGTH {
            return Err(ConfigError::Invalid("api.base_url exceeds max length".to_string()));
        }
        let parsed = Url::parse(trimmed)
            .map_err(|err| ConfigError::Invalid(format!("api.base_url is not a valid url: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "api.base_url must use http:// or https://".to_string(),
            ));
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::Invalid("api.base_url must include a host".to_string()));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "api.base_url must not include a query or fragment".to_string(),
            ));
        }
        self.base_url = trimmed.to_string();
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "api.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(
                "api.max_response_bytes must be between 1 and 1073741824".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where session credentials and preferences are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStorageKind {
    /// Process memory; nothing survives exit.
    Memory,
    /// JSON file on disk.
    #[default]
    File,
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Storage backend.
    #[serde(default)]
    pub storage: SessionStorageKind,
    /// Session file path; defaults under the platform config directory.
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionConfig {
    /// Returns the session file path for file storage.
    ///
    /// Returns `None` for memory storage, or when no path is configured and
    /// the platform has no config directory.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        if self.storage == SessionStorageKind::Memory {
            return None;
        }
        match &self.path {
            Some(path) => Some(PathBuf::from(path.trim())),
            None => dirs::config_dir().map(|dir| dir.join(STATE_DIR_NAME).join(SESSION_FILE_NAME)),
        }
    }

    /// Validates session settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("session.path", path)?;
        }
        Ok(())
    }
}

/// Request log sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkKind {
    /// Discard request events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `logging.path`.
    File,
}

/// Request log settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Sink for request events.
    #[serde(default)]
    pub sink: LogSinkKind,
    /// Log file path; required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (LogSinkKind::File, None) => Err(ConfigError::Invalid(
                "logging.sink=file requires logging.path".to_string(),
            )),
            (_, Some(path)) => validate_path_string("logging.path", path),
            (_, None) => Ok(()),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Message locale tag (for example `en` or `zh-CN`).
    #[serde(default)]
    pub locale: Option<String>,
}

impl UiConfig {
    /// Validates display settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(locale) = &self.locale {
            let trimmed = locale.trim();
            if trimmed.is_empty() || trimmed.len() > MAX_LOCALE_LENGTH {
                return Err(ConfigError::Invalid(
                    "ui.locale must be a short non-empty tag".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Returns the default base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Returns the default timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Returns the default response cap.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it must exist.
fn resolve_path<F>(path: Option<&Path>, lookup: &F) -> Result<(PathBuf, bool), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Some(env_path) = lookup(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
