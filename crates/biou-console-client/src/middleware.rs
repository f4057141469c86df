// crates/biou-console-client/src/middleware.rs
// ============================================================================
// Module: Request Middleware
// Description: Ordered request and response hooks around every call.
// Purpose: Inject credentials, bust caches, and classify failures uniformly.
// Dependencies: biou-console-client::{envelope, i18n, notice, session}, reqwest
// ============================================================================

//! ## Overview
//! A [`Pipeline`] is composed once when the client is built. Request hooks
//! run in order and may rewrite or reject the outgoing request. Response
//! hooks run in order over the transport result and may turn a response into
//! an error. The built-in hooks are always first:
//!
//! 1. [`BearerAuth`] attaches `Authorization: Bearer <token>` when a token is
//!    stored.
//! 2. [`CacheBuster`] adds a strictly increasing `_t` parameter to `GET`.
//! 3. [`StatusClassifier`] maps transport failures and non-2xx statuses.
//! 4. [`EnvelopeValidator`] parses the envelope and maps business codes.
//!
//! ## Invariants
//! - The unauthorized procedure in [`Feedback`] is the only implicit path
//!   that clears credentials.
//! - A caller-supplied `_t` is kept verbatim and never duplicated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::Value;

use crate::envelope::BusinessCode;
use crate::envelope::ResponseEnvelope;
use crate::error::ClientError;
use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::translate_in;
use crate::models::upload::UploadProgress;
use crate::notice::LOGIN_ROUTE;
use crate::notice::Navigator;
use crate::notice::Notice;
use crate::notice::NoticeSink;
use crate::session::Session;

// ============================================================================
// SECTION: Request and Response Types
// ============================================================================

/// Query parameter used to defeat intermediary caches on `GET`.
pub const CACHE_BUST_PARAM: &str = "_t";

/// How the response body is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    /// The body is a JSON envelope.
    #[default]
    Json,
    /// The body is raw bytes (file downloads).
    Binary,
}

/// Upload progress callback.
pub type ProgressCallback = Arc<dyn Fn(&UploadProgress) + Send + Sync>;

/// A file to send as the `file` multipart field.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type; `application/octet-stream` when unset.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

impl UploadFile {
    /// Builds an upload from a name and contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Multipart form with one file part and optional text fields.
#[derive(Clone)]
pub struct MultipartBody {
    /// File part.
    pub file: UploadFile,
    /// Extra text fields in order.
    pub fields: Vec<(String, String)>,
    /// Progress callback invoked as chunks are handed to the transport.
    pub progress: Option<ProgressCallback>,
}

impl fmt::Debug for MultipartBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartBody")
            .field("file", &self.file.file_name)
            .field("bytes", &self.file.bytes.len())
            .field("fields", &self.fields)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Outgoing request body.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON body.
    Json(Value),
    /// Multipart form.
    Multipart(MultipartBody),
}

impl RequestBody {
    /// Returns the approximate encoded size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Json(value) => serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0),
            Self::Multipart(body) => {
                body.file.bytes.len()
                    + body.fields.iter().map(|(name, value)| name.len() + value.len()).sum::<usize>()
            }
        }
    }

    /// Returns true when there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A request on its way through the pipeline.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: HeaderMap,
    /// Body.
    pub body: RequestBody,
    /// Expected response kind.
    pub response_kind: ResponseKind,
}

impl OutgoingRequest {
    /// Builds a bodiless JSON request.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            response_kind: ResponseKind::Json,
        }
    }

    /// Returns the first value of query parameter `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

/// A response on its way back through the pipeline.
#[derive(Debug, Clone)]
pub struct IncomingResponse {
    /// HTTP status.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Bytes,
    /// Parsed envelope once validated.
    pub envelope: Option<ResponseEnvelope>,
}

impl IncomingResponse {
    /// Builds an unvalidated response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            envelope: None,
        }
    }

    /// Returns true when the content type names JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"))
    }
}

// ============================================================================
// SECTION: Hook Traits
// ============================================================================

/// Rewrites or rejects a request before it is sent.
pub trait RequestHook: Send + Sync {
    /// Returns the request to send.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] to abort the call before sending.
    fn before_send(&self, request: OutgoingRequest) -> Result<OutgoingRequest, ClientError>;
}

/// Inspects or rewrites the transport result.
pub trait ResponseHook: Send + Sync {
    /// Returns the result handed to the next hook.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the response represents a failure.
    fn after_receive(
        &self,
        request: &OutgoingRequest,
        result: Result<IncomingResponse, ClientError>,
    ) -> Result<IncomingResponse, ClientError>;
}

/// Source of epoch milliseconds.
pub trait Clock: Send + Sync {
    /// Returns the current epoch time in milliseconds.
    fn now_millis(&self) -> u64;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}

// ============================================================================
// SECTION: Feedback
// ============================================================================

/// Notices, navigation, and credential clearing shared by the hooks.
pub struct Feedback {
    /// Session cleared by the unauthorized procedure.
    session: Session,
    /// Notice destination.
    notices: Arc<dyn NoticeSink>,
    /// Navigation target.
    navigator: Arc<dyn Navigator>,
    /// Notice language.
    locale: Locale,
}

impl Feedback {
    /// Bundles the collaborators.
    #[must_use]
    pub fn new(
        session: Session,
        notices: Arc<dyn NoticeSink>,
        navigator: Arc<dyn Navigator>,
        locale: Locale,
    ) -> Self {
        Self {
            session,
            notices,
            navigator,
            locale,
        }
    }

    /// Returns the notice language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Translates `key` in the notice language.
    #[must_use]
    pub fn message(&self, key: &str, args: Vec<MessageArg>) -> String {
        translate_in(self.locale, key, args)
    }

    /// Shows `message` as an error notice.
    pub fn notify(&self, message: &str) {
        self.notices.notify(&Notice::error(message));
    }

    /// Runs the unauthorized procedure and returns the resulting error.
    ///
    /// Shows the session-expired notice, removes the three credential keys,
    /// and navigates to the login route. A storage failure while clearing
    /// does not stop navigation.
    #[must_use]
    pub fn unauthorized(&self, message: Option<String>) -> ClientError {
        let expired = self.message("notice.session_expired", Vec::new());
        self.notify(&expired);
        let _ = self.session.clear_credentials();
        self.navigator.navigate(LOGIN_ROUTE);
        let message = message.filter(|text| !text.is_empty()).unwrap_or(expired);
        ClientError::Unauthorized {
            message,
        }
    }
}

// ============================================================================
// SECTION: Built-in Request Hooks
// ============================================================================

/// Attaches the stored bearer token.
pub struct BearerAuth {
    /// Token source.
    session: Session,
}

impl BearerAuth {
    /// Creates the hook over `session`.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self {
            session,
        }
    }
}

impl RequestHook for BearerAuth {
    fn before_send(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest, ClientError> {
        if let Some(token) = self.session.token()? {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::Config("invalid auth token".to_string()))?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(request)
    }
}

/// Adds a strictly increasing `_t` to `GET` requests.
pub struct CacheBuster {
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Last issued value.
    last: AtomicU64,
}

impl CacheBuster {
    /// Creates the hook over `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    /// Returns the next stamp: the clock reading, or one past the last stamp.
    fn next_stamp(&self) -> u64 {
        let now = self.clock.now_millis();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(observed) => current = observed,
            }
        }
    }
}

impl RequestHook for CacheBuster {
    fn before_send(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest, ClientError> {
        if request.method == Method::GET && request.query_value(CACHE_BUST_PARAM).is_none() {
            request.query.push((CACHE_BUST_PARAM.to_string(), self.next_stamp().to_string()));
        }
        Ok(request)
    }
}

// ============================================================================
// SECTION: Built-in Response Hooks
// ============================================================================

/// Maps transport failures and non-2xx statuses.
pub struct StatusClassifier {
    /// Shared notice and session handling.
    feedback: Arc<Feedback>,
}

impl StatusClassifier {
    /// Creates the hook.
    #[must_use]
    pub const fn new(feedback: Arc<Feedback>) -> Self {
        Self {
            feedback,
        }
    }
}

impl ResponseHook for StatusClassifier {
    fn after_receive(
        &self,
        _request: &OutgoingRequest,
        result: Result<IncomingResponse, ClientError>,
    ) -> Result<IncomingResponse, ClientError> {
        let response = match result {
            Ok(response) => response,
            Err(ClientError::Network {
                ..
            }) => {
                let message = self.feedback.message("notice.network_unreachable", Vec::new());
                self.feedback.notify(&message);
                return Err(ClientError::Network {
                    message,
                });
            }
            Err(other) => return Err(other),
        };
        if (200 .. 300).contains(&response.status) {
            return Ok(response);
        }
        let status = response.status;
        let message = match status {
            401 => return Err(self.feedback.unauthorized(None)),
            403 => self.feedback.message("notice.forbidden", Vec::new()),
            404 => self.feedback.message("notice.endpoint_not_found", Vec::new()),
            500 => self.feedback.message("notice.server_error", Vec::new()),
            _ => self.feedback.message(
                "notice.request_failed_status",
                vec![MessageArg::new("status", status.to_string())],
            ),
        };
        self.feedback.notify(&message);
        Err(ClientError::HttpStatus {
            status,
            message,
        })
    }
}

/// Parses the envelope and maps non-success business codes.
pub struct EnvelopeValidator {
    /// Shared notice and session handling.
    feedback: Arc<Feedback>,
}

impl EnvelopeValidator {
    /// Creates the hook.
    #[must_use]
    pub const fn new(feedback: Arc<Feedback>) -> Self {
        Self {
            feedback,
        }
    }
}

impl ResponseHook for EnvelopeValidator {
    fn after_receive(
        &self,
        request: &OutgoingRequest,
        result: Result<IncomingResponse, ClientError>,
    ) -> Result<IncomingResponse, ClientError> {
        let mut response = result?;
        if request.response_kind == ResponseKind::Binary && !response.is_json() {
            return Ok(response);
        }
        // A body without an envelope has no business code and counts as a
        // failed call.
        let Ok(envelope) = ResponseEnvelope::from_slice(&response.body) else {
            let message = self.feedback.message("notice.request_failed", Vec::new());
            self.feedback.notify(&message);
            return Err(ClientError::Business {
                code: 0,
                message,
            });
        };
        if envelope.is_success() {
            response.envelope = Some(envelope);
            return Ok(response);
        }
        let code = envelope.code;
        if BusinessCode::from_code(code) == Some(BusinessCode::Unauthorized) {
            return Err(self.feedback.unauthorized(Some(envelope.message)));
        }
        let message = if envelope.message.is_empty() {
            self.feedback.message("notice.request_failed", Vec::new())
        } else {
            envelope.message
        };
        let notice = match BusinessCode::from_code(code) {
            Some(BusinessCode::Forbidden) => self.feedback.message("notice.forbidden", Vec::new()),
            Some(BusinessCode::NotFound) => {
                self.feedback.message("notice.resource_not_found", Vec::new())
            }
            _ => message.clone(),
        };
        self.feedback.notify(&notice);
        Err(ClientError::Business {
            code,
            message,
        })
    }
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Ordered request and response hooks.
#[derive(Clone)]
pub struct Pipeline {
    /// Request hooks in execution order.
    request_hooks: Vec<Arc<dyn RequestHook>>,
    /// Response hooks in execution order.
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl Pipeline {
    /// Builds a pipeline holding only the built-in hooks.
    #[must_use]
    pub fn with_builtins(session: &Session, feedback: &Arc<Feedback>, clock: Arc<dyn Clock>) -> Self {
        Self {
            request_hooks: vec![
                Arc::new(BearerAuth::new(session.clone())),
                Arc::new(CacheBuster::new(clock)),
            ],
            response_hooks: vec![
                Arc::new(StatusClassifier::new(Arc::clone(feedback))),
                Arc::new(EnvelopeValidator::new(Arc::clone(feedback))),
            ],
        }
    }

    /// Appends a request hook after the existing ones.
    pub fn push_request_hook(&mut self, hook: Arc<dyn RequestHook>) {
        self.request_hooks.push(hook);
    }

    /// Appends a response hook after the existing ones.
    pub fn push_response_hook(&mut self, hook: Arc<dyn ResponseHook>) {
        self.response_hooks.push(hook);
    }

    /// Runs the request hooks in order.
    ///
    /// # Errors
    ///
    /// Returns the first hook error.
    pub fn prepare(&self, request: OutgoingRequest) -> Result<OutgoingRequest, ClientError> {
        self.request_hooks.iter().try_fold(request, |request, hook| hook.before_send(request))
    }

    /// Runs the response hooks in order.
    ///
    /// # Errors
    ///
    /// Returns the error left by the last hook.
    pub fn finish(
        &self,
        request: &OutgoingRequest,
        result: Result<IncomingResponse, ClientError>,
    ) -> Result<IncomingResponse, ClientError> {
        self.response_hooks.iter().fold(result, |result, hook| hook.after_receive(request, result))
    }
}
