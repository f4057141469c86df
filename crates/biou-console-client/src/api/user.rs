// crates/biou-console-client/src/api/user.rs
// ============================================================================
// Module: User API
// Description: User listing, creation, update, deletion, and status.
// Purpose: Map each user operation to its fixed `/user` path.
// Dependencies: biou-console-client::{client, envelope, models}
// ============================================================================

use serde_json::Value;

use crate::client::ConsoleClient;
use crate::envelope::PageQuery;
use crate::envelope::PageResult;
use crate::error::ClientError;
use crate::models::logs::Paged;
use crate::models::user::CreateUserRequest;
use crate::models::user::ResetPasswordResult;
use crate::models::user::UpdateUserRequest;
use crate::models::user::UserFilter;
use crate::models::user::UserStatus;
use crate::models::user::UserSummary;

/// User endpoints.
#[derive(Clone, Copy)]
pub struct UserApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> UserApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `POST /user/page`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a zero page or size, or the
    /// call failure.
    pub async fn page(
        &self,
        page: PageQuery,
        filter: &UserFilter,
    ) -> Result<PageResult<UserSummary>, ClientError> {
        page.validate()?;
        self.client.post("/user/page", &Paged::new(page, filter)).await
    }

    /// `POST /user`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<(), ClientError> {
        self.client.post::<Value, _>("/user", request).await.map(|_| ())
    }

    /// `PUT /user/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> Result<(), ClientError> {
        self.client.put::<Value, _>(&format!("/user/{id}"), request).await.map(|_| ())
    }

    /// `DELETE /user/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client.delete::<Value>(&format!("/user/{id}"), Vec::new()).await.map(|_| ())
    }

    /// `POST /user/{id}/reset-password`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn reset_password(&self, id: i64) -> Result<ResetPasswordResult, ClientError> {
        self.client.post_empty(&format!("/user/{id}/reset-password")).await
    }

    /// `PATCH /user/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn set_status(&self, id: i64, status: i32) -> Result<(), ClientError> {
        let body = UserStatus {
            status,
        };
        self.client.patch::<Value, _>(&format!("/user/{id}/status"), &body).await.map(|_| ())
    }
}
