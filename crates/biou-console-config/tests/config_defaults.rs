//! Config defaults and core validation tests for biou-console-config.
// crates/biou-console-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and field-level invariants.
// Purpose: Ensure a minimal config is valid and bad values fail closed.
// =============================================================================

use biou_console_config::DEFAULT_BASE_URL;
use biou_console_config::DEFAULT_MAX_RESPONSE_BYTES;
use biou_console_config::DEFAULT_TIMEOUT_MS;
use biou_console_config::LogSinkKind;
use biou_console_config::SessionStorageKind;

mod common;

use crate::common::assert_invalid;

type TestResult = Result<(), String>;

#[test]
fn default_config_validates() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.api.base_url != DEFAULT_BASE_URL {
        return Err(format!("unexpected base url {}", config.api.base_url));
    }
    if config.api.timeout_ms != DEFAULT_TIMEOUT_MS {
        return Err("timeout should default to 10s".to_string());
    }
    if config.api.max_response_bytes != DEFAULT_MAX_RESPONSE_BYTES {
        return Err("response cap should default to 64 MiB".to_string());
    }
    if config.session.storage != SessionStorageKind::File {
        return Err("session storage should default to file".to_string());
    }
    if config.logging.sink != LogSinkKind::None {
        return Err("logging should default to none".to_string());
    }
    Ok(())
}

#[test]
fn trailing_slash_is_stripped_from_base_url() -> TestResult {
    let mut config = common::config_from_toml("[api]\nbase_url = \"https://admin.example.com/api/\"\n")
        .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.api.base_url != "https://admin.example.com/api" {
        return Err(format!("base url not normalized: {}", config.api.base_url));
    }
    Ok(())
}

#[test]
fn relative_base_url_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.api.base_url = "/api".to_string();
    assert_invalid(config.validate(), "api.base_url is not a valid url")
}

#[test]
fn non_http_base_url_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.api.base_url = "ftp://example.com/api".to_string();
    assert_invalid(config.validate(), "http:// or https://")
}

#[test]
fn base_url_with_query_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.api.base_url = "http://example.com/api?x=1".to_string();
    assert_invalid(config.validate(), "query or fragment")
}

#[test]
fn timeout_bounds_are_enforced() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.api.timeout_ms = 10;
    assert_invalid(config.validate(), "api.timeout_ms")?;
    config.api.timeout_ms = 600_000;
    assert_invalid(config.validate(), "api.timeout_ms")
}

#[test]
fn zero_response_cap_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.api.max_response_bytes = 0;
    assert_invalid(config.validate(), "api.max_response_bytes")
}

#[test]
fn file_log_sink_requires_path() -> TestResult {
    let mut config = common::config_from_toml("[logging]\nsink = \"file\"\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "logging.sink=file requires logging.path")
}

#[test]
fn blank_locale_is_rejected() -> TestResult {
    let mut config = common::config_from_toml("[ui]\nlocale = \"  \"\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "ui.locale")
}

#[test]
fn memory_storage_has_no_session_file() -> TestResult {
    let config = common::config_from_toml("[session]\nstorage = \"memory\"\npath = \"/tmp/s.json\"\n")
        .map_err(|err| err.to_string())?;
    if config.session.file_path().is_some() {
        return Err("memory storage should not resolve a file".to_string());
    }
    Ok(())
}

#[test]
fn explicit_session_path_is_used() -> TestResult {
    let config = common::config_from_toml("[session]\npath = \"state/session.json\"\n")
        .map_err(|err| err.to_string())?;
    match config.session.file_path() {
        Some(path) if path.ends_with("state/session.json") => Ok(()),
        other => Err(format!("unexpected session path {other:?}")),
    }
}

#[test]
fn unknown_storage_kind_fails_to_parse() -> TestResult {
    match common::config_from_toml("[session]\nstorage = \"redis\"\n") {
        Err(_) => Ok(()),
        Ok(_) => Err("unknown storage kind should not parse".to_string()),
    }
}
