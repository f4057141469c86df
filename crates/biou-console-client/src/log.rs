// crates/biou-console-client/src/log.rs
// ============================================================================
// Module: Request Logging
// Description: Structured events for console HTTP requests.
// Purpose: Emit redacted request logs without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each wrapper call produces one [`RequestLogEvent`] describing the method,
//! path, status, and outcome. Events are JSON lines routed through a
//! [`RequestLogSink`]. Tokens, query values, and bodies are never recorded;
//! only byte counts are.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Final outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// The envelope carried the success code (or a binary body arrived).
    Success,
    /// Any transport, status, business, or decode failure.
    Failure,
}

/// Structured log entry for one request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestLogEvent {
    /// Event name.
    pub event: &'static str,
    /// Event timestamp in epoch milliseconds.
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the base URL, without the query string.
    pub path: String,
    /// HTTP status when a response arrived.
    pub status: Option<u16>,
    /// Business code when an envelope was parsed.
    pub business_code: Option<i64>,
    /// Final outcome.
    pub outcome: RequestOutcome,
    /// Error label on failure.
    pub error_kind: Option<&'static str>,
    /// Elapsed wall time in milliseconds.
    pub duration_ms: u128,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs for [`RequestLogEvent::new`].
pub struct RequestLogEventParams {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// HTTP status when a response arrived.
    pub status: Option<u16>,
    /// Business code when an envelope was parsed.
    pub business_code: Option<i64>,
    /// Final outcome.
    pub outcome: RequestOutcome,
    /// Error label on failure.
    pub error_kind: Option<&'static str>,
    /// Elapsed wall time in milliseconds.
    pub duration_ms: u128,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl RequestLogEvent {
    /// Creates a request event stamped with the current time.
    #[must_use]
    pub fn new(params: RequestLogEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "http_request",
            timestamp_ms,
            method: params.method,
            path: params.path,
            status: params.status,
            business_code: params.business_code,
            outcome: params.outcome,
            error_kind: params.error_kind,
            duration_ms: params.duration_ms,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for request events.
pub trait RequestLogSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &RequestLogEvent);
}

/// Sink that writes JSON lines to stderr.
pub struct StderrRequestLogSink;

impl RequestLogSink for StderrRequestLogSink {
    fn record(&self, event: &RequestLogEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileRequestLogSink {
    /// Append-only file handle.
    file: Mutex<std::fs::File>,
}

impl FileRequestLogSink {
    /// Opens `path` in append mode, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RequestLogSink for FileRequestLogSink {
    fn record(&self, event: &RequestLogEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that drops every event.
pub struct NoopRequestLogSink;

impl RequestLogSink for NoopRequestLogSink {
    fn record(&self, _event: &RequestLogEvent) {}
}
