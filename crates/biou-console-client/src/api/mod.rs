// crates/biou-console-client/src/api/mod.rs
// ============================================================================
// Module: API Surface
// Description: One typed function per backend operation.
// Purpose: Fix each operation's path and method in a single place.
// Dependencies: biou-console-client::client
// ============================================================================

//! ## Overview
//! Each group borrows the [`ConsoleClient`] and makes exactly one wrapper
//! call per operation. Groups are reached through accessors such as
//! [`ConsoleClient::auth`] and [`ConsoleClient::logs`].

pub mod auth;
pub mod config;
pub mod logs;
pub mod system;
pub mod upload;
pub mod user;

pub use auth::AuthApi;
pub use config::ConfigApi;
pub use logs::LogApi;
pub use system::SystemApi;
pub use upload::UploadApi;
pub use user::UserApi;

use crate::client::ConsoleClient;

impl ConsoleClient {
    /// Authentication operations.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Log queries, statistics, cleanup, and export.
    #[must_use]
    pub const fn logs(&self) -> LogApi<'_> {
        LogApi::new(self)
    }

    /// System information and monitoring.
    #[must_use]
    pub const fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    /// User administration.
    #[must_use]
    pub const fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// File uploads.
    #[must_use]
    pub const fn uploads(&self) -> UploadApi<'_> {
        UploadApi::new(self)
    }

    /// System and email configuration.
    #[must_use]
    pub const fn config(&self) -> ConfigApi<'_> {
        ConfigApi::new(self)
    }
}
