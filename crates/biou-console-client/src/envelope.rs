// crates/biou-console-client/src/envelope.rs
// ============================================================================
// Module: Response Envelope
// Description: The `{code, message, data, timestamp}` wrapper on every body.
// Purpose: Make the business code the single source of truth for success.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The server wraps every JSON body in a [`ResponseEnvelope`]. A call succeeds
//! iff `code == SUCCESS_CODE`; `data` may be absent or `null` for void
//! operations. Paged endpoints return a [`PageResult`] in `data`, which is
//! trusted as sent.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

/// Business code signalling success.
pub const SUCCESS_CODE: i64 = 200;

/// Known business codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessCode {
    /// 200.
    Success,
    /// 400.
    ParamError,
    /// 401; ends the session.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 500.
    InternalError,
}

impl BusinessCode {
    /// Maps a raw code to a known variant.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            200 => Some(Self::Success),
            400 => Some(Self::ParamError),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            500 => Some(Self::InternalError),
            _ => None,
        }
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Success => 200,
            Self::ParamError => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = Value> {
    /// Business code.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Payload; absent or `null` for void operations.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Server timestamp in epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl<T> ResponseEnvelope<T> {
    /// Returns true when the business code signals success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

impl ResponseEnvelope<Value> {
    /// Parses an envelope from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body is not an envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, ClientError> {
        serde_json::from_slice(body)
            .map_err(|err| ClientError::Decode(format!("invalid response envelope: {err}")))
    }
}

/// One page of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    /// Total records across all pages.
    #[serde(default)]
    pub total: u64,
    /// Page size.
    #[serde(default)]
    pub size: u64,
    /// 1-based page number.
    #[serde(default)]
    pub current: u64,
    /// Total pages.
    #[serde(default)]
    pub pages: u64,
}

/// Paging fields shared by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub current: u32,
    /// Page size.
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl PageQuery {
    /// Builds a page query.
    #[must_use]
    pub const fn new(current: u32, size: u32) -> Self {
        Self {
            current,
            size,
        }
    }

    /// Rejects pages or sizes below 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] when either field is zero.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.current == 0 {
            return Err(ClientError::InvalidInput("current must be at least 1".to_string()));
        }
        if self.size == 0 {
            return Err(ClientError::InvalidInput("size must be at least 1".to_string()));
        }
        Ok(())
    }
}
