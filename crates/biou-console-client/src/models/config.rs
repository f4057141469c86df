// crates/biou-console-client/src/models/config.rs
// ============================================================================
// Module: Server Config Models
// Description: Site, password policy, and mail settings held by the server.
// Purpose: Type the `/config` endpoints.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// Password rules enforced by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicy {
    /// Minimum length.
    pub min_length: u32,
    /// Requires an uppercase letter.
    pub require_uppercase: bool,
    /// Requires a lowercase letter.
    pub require_lowercase: bool,
    /// Requires a digit.
    pub require_numbers: bool,
    /// Requires a symbol.
    pub require_special_chars: bool,
}

/// Site-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    /// Site name.
    pub site_name: String,
    /// Site description.
    pub site_description: String,
    /// Logo URL.
    pub site_logo: String,
    /// Self sign-up allowed.
    pub registration_enabled: bool,
    /// New accounts must verify email.
    pub email_verification_required: bool,
    /// Failed attempts before lockout.
    pub max_login_attempts: u32,
    /// Lockout length in minutes.
    pub lockout_duration: u64,
    /// Password rules.
    pub password_policy: PasswordPolicy,
    /// Idle session timeout in minutes.
    pub session_timeout: u64,
    /// Days of logs kept by the cleanup task.
    pub log_retention_days: u32,
}

/// Outgoing mail settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfig {
    /// Mail sending enabled.
    pub enabled: bool,
    /// SMTP host.
    pub host: String,
    /// SMTP port.
    pub port: u16,
    /// SMTP account.
    pub username: String,
    /// Use TLS.
    pub ssl: bool,
    /// Sender display name.
    pub from_name: String,
    /// Sender address.
    pub from_email: String,
}

/// Body of `POST /config/email/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTestRequest {
    /// Recipient address.
    pub email: String,
}
