// crates/biou-console-client/src/api/auth.rs
// ============================================================================
// Module: Auth API
// Description: Login, logout, token refresh, and password change.
// Purpose: Keep the session context in step with the auth endpoints.
// Dependencies: biou-console-client::{client, models, session}
// ============================================================================

//! ## Overview
//! `login` stores the token, refresh token, and user info in one storage
//! operation. `logout` clears the same keys whether or not the remote call
//! succeeds.

use serde_json::Value;

use crate::client::ConsoleClient;
use crate::error::ClientError;
use crate::models::auth::ChangePasswordRequest;
use crate::models::auth::LoginRequest;
use crate::models::auth::LoginResponse;
use crate::models::auth::TokenRefresh;
use crate::models::auth::UserInfo;

/// Authentication endpoints.
#[derive(Clone, Copy)]
pub struct AuthApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> AuthApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `POST /auth/login`; stores the credentials on success.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails or the session cannot be
    /// written.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response: LoginResponse = self.client.post("/auth/login", request).await?;
        self.client.session().store_login(&response)?;
        Ok(response)
    }

    /// `POST /auth/logout`; always clears the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns the remote failure, or a storage error when clearing fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let remote = self.client.post_empty::<Value>("/auth/logout").await;
        let cleared = self.client.session().clear_credentials();
        remote?;
        cleared?;
        Ok(())
    }

    /// `POST /auth/refresh-token`; stores the new bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails or the token cannot be
    /// stored.
    pub async fn refresh_token(&self) -> Result<TokenRefresh, ClientError> {
        let refreshed: TokenRefresh = self.client.post_empty("/auth/refresh-token").await?;
        self.client.session().store_token(&refreshed.token)?;
        Ok(refreshed)
    }

    /// `GET /auth/current-user`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn current_user(&self) -> Result<UserInfo, ClientError> {
        self.client.get("/auth/current-user", Vec::new()).await
    }

    /// `POST /auth/change-password`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ClientError> {
        self.client.post::<Value, _>("/auth/change-password", request).await.map(|_| ())
    }
}
