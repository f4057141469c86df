// crates/biou-console-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for biou-console-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use biou_console_config::ConfigError;
use biou_console_config::ConsoleConfig;

/// Parses a TOML string into a `ConsoleConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ConsoleConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<ConsoleConfig, toml::de::Error> {
    config_from_toml("")
}

/// Environment lookup that sees no variables.
pub fn empty_env(_key: &str) -> Option<String> {
    None
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
