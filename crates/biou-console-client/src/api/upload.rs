// crates/biou-console-client/src/api/upload.rs
// ============================================================================
// Module: Upload API
// Description: Avatar and generic file uploads.
// Purpose: Send files as multipart forms under the `file` field.
// Dependencies: biou-console-client::{client, middleware, models}
// ============================================================================

use crate::client::ConsoleClient;
use crate::error::ClientError;
use crate::middleware::ProgressCallback;
use crate::middleware::UploadFile;
use crate::models::upload::AvatarUpload;
use crate::models::upload::FileUpload;

/// Upload endpoints.
#[derive(Clone, Copy)]
pub struct UploadApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> UploadApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `POST /upload/avatar`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn avatar(
        &self,
        file: UploadFile,
        progress: Option<ProgressCallback>,
    ) -> Result<AvatarUpload, ClientError> {
        self.client.upload("/upload/avatar", file, Vec::new(), progress).await
    }

    /// `POST /upload/file` with an optional `type` field.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn file(
        &self,
        file: UploadFile,
        file_type: Option<&str>,
        progress: Option<ProgressCallback>,
    ) -> Result<FileUpload, ClientError> {
        let fields = file_type
            .filter(|value| !value.is_empty())
            .map(|value| vec![("type".to_string(), value.to_string())])
            .unwrap_or_default();
        self.client.upload("/upload/file", file, fields, progress).await
    }
}
