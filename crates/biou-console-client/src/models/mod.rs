// crates/biou-console-client/src/models/mod.rs
// ============================================================================
// Module: API Models
// Description: Request and response payloads for the admin log service.
// Purpose: Give every endpoint a typed body with the server's field names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Field names follow the server's camelCase JSON. Optional filters are
//! omitted from serialized bodies when unset.

pub mod auth;
pub mod config;
pub mod logs;
pub mod system;
pub mod upload;
pub mod user;

pub use auth::ChangePasswordRequest;
pub use auth::LoginRequest;
pub use auth::LoginResponse;
pub use auth::TokenRefresh;
pub use auth::UserInfo;
pub use config::EmailConfig;
pub use config::PasswordPolicy;
pub use config::SystemConfig;
pub use logs::AuditLog;
pub use logs::AuditLogFilter;
pub use logs::LogKind;
pub use logs::LogStatistics;
pub use logs::LoginLog;
pub use logs::LoginLogFilter;
pub use logs::Paged;
pub use logs::SystemLog;
pub use logs::SystemLogFilter;
pub use system::HealthStatus;
pub use system::MonitorData;
pub use system::SystemInfo;
pub use upload::AvatarUpload;
pub use upload::FileUpload;
pub use upload::UploadProgress;
pub use user::CreateUserRequest;
pub use user::ResetPasswordResult;
pub use user::UpdateUserRequest;
pub use user::UserFilter;
pub use user::UserSummary;
