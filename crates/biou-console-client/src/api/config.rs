// crates/biou-console-client/src/api/config.rs
// ============================================================================
// Module: Config API
// Description: System and email configuration endpoints.
// Purpose: Read and replace server-side settings.
// Dependencies: biou-console-client::{client, models}
// ============================================================================

use serde_json::Value;

use crate::client::ConsoleClient;
use crate::error::ClientError;
use crate::models::config::EmailConfig;
use crate::models::config::EmailTestRequest;
use crate::models::config::SystemConfig;

/// Configuration endpoints.
#[derive(Clone, Copy)]
pub struct ConfigApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> ConfigApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `GET /config/system`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn system(&self) -> Result<SystemConfig, ClientError> {
        self.client.get("/config/system", Vec::new()).await
    }

    /// `PUT /config/system`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn update_system(&self, config: &SystemConfig) -> Result<(), ClientError> {
        self.client.put::<Value, _>("/config/system", config).await.map(|_| ())
    }

    /// `GET /config/email`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn email(&self) -> Result<EmailConfig, ClientError> {
        self.client.get("/config/email", Vec::new()).await
    }

    /// `PUT /config/email`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn update_email(&self, config: &EmailConfig) -> Result<(), ClientError> {
        self.client.put::<Value, _>("/config/email", config).await.map(|_| ())
    }

    /// `POST /config/email/test`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn test_email(&self, email: &str) -> Result<(), ClientError> {
        let body = EmailTestRequest {
            email: email.to_string(),
        };
        self.client.post::<Value, _>("/config/email/test", &body).await.map(|_| ())
    }
}
