// crates/biou-console-config/src/lib.rs
// ============================================================================
// Module: Biou Console Config
// Description: Configuration model and loader for the Biou console.
// Purpose: Resolve API endpoint, timeouts, session storage, and logging.
// Dependencies: dirs, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! `biou-console-config` loads `biou-console.toml`, applies environment
//! overrides, and validates the result before any request is made.

pub mod config;

pub use config::ApiConfig;
pub use config::BASE_URL_ENV_VAR;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::ConsoleConfig;
pub use config::DEFAULT_BASE_URL;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::DEFAULT_MAX_RESPONSE_BYTES;
pub use config::DEFAULT_TIMEOUT_MS;
pub use config::LogSinkKind;
pub use config::LoggingConfig;
pub use config::SessionConfig;
pub use config::SessionStorageKind;
pub use config::UiConfig;
