// crates/biou-console-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error taxonomy for console API calls.
// Purpose: Distinguish transport, HTTP, business, and local failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every wrapper call fails with a [`ClientError`]. Transport, HTTP status,
//! business, and unauthorized errors carry the message that was shown to the
//! user; the remaining variants describe local failures that never reached
//! the server or could not be decoded.

use thiserror::Error;

use crate::session::StorageError;

/// Errors returned by the console client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("{message}")]
    Network {
        /// User-facing message.
        message: String,
    },
    /// The server answered with a non-2xx HTTP status.
    #[error("{message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// User-facing message.
        message: String,
    },
    /// The envelope carried a non-success business code.
    #[error("{message}")]
    Business {
        /// Business code from the envelope.
        code: i64,
        /// Envelope message, or a localized fallback.
        message: String,
    },
    /// The session was rejected; credentials have been cleared.
    #[error("{message}")]
    Unauthorized {
        /// User-facing message.
        message: String,
    },
    /// Caller input was rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The client could not be constructed or a header was invalid.
    #[error("client config error: {0}")]
    Config(String),
    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// The response body exceeded the configured cap.
    #[error("response exceeds size limit ({actual} > {limit} bytes)")]
    ResponseTooLarge {
        /// Bytes received before the cap was hit.
        actual: usize,
        /// Configured cap.
        limit: usize,
    },
    /// Session storage failed.
    #[error("session storage error: {0}")]
    Storage(String),
    /// Local file I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

impl ClientError {
    /// Returns a stable label for request logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network {
                ..
            } => "network",
            Self::HttpStatus {
                ..
            } => "http_status",
            Self::Business {
                ..
            } => "business",
            Self::Unauthorized {
                ..
            } => "unauthorized",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Decode(_) => "decode",
            Self::ResponseTooLarge {
                ..
            } => "response_too_large",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
        }
    }

    /// Returns true when the error ended the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true when the middleware already raised a notice for this
    /// error.
    #[must_use]
    pub const fn raises_notice(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::HttpStatus { .. }
                | Self::Business { .. }
                | Self::Unauthorized { .. }
        )
    }
}

impl From<StorageError> for ClientError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error.to_string())
    }
}
