// crates/biou-console-client/src/api/system.rs
// ============================================================================
// Module: System API
// Description: System information, health, and monitor endpoints.
// Purpose: Read-only views of the backend host.
// Dependencies: biou-console-client::{client, models}
// ============================================================================

use crate::client::ConsoleClient;
use crate::error::ClientError;
use crate::models::system::HealthStatus;
use crate::models::system::MonitorData;
use crate::models::system::SystemInfo;

/// System endpoints.
#[derive(Clone, Copy)]
pub struct SystemApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> SystemApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `GET /system/info`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn info(&self) -> Result<SystemInfo, ClientError> {
        self.client.get("/system/info", Vec::new()).await
    }

    /// `GET /system/health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.client.get("/system/health", Vec::new()).await
    }

    /// `GET /system/monitor`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn monitor(&self) -> Result<MonitorData, ClientError> {
        self.client.get("/system/monitor", Vec::new()).await
    }
}
