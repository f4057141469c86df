// crates/biou-console-client/src/client.rs
// ============================================================================
// Module: Console Client
// Description: Request wrapper that runs the middleware chain over a transport.
// Purpose: Give API modules one typed entry point per HTTP verb.
// Dependencies: biou-console-config, reqwest, serde, tempfile, tokio
// ============================================================================

//! ## Overview
//! [`ConsoleClient`] owns the session, the composed [`Pipeline`], and the
//! transport. Each call prepares an [`OutgoingRequest`], sends it, runs the
//! response hooks, logs one [`RequestLogEvent`], and resolves with the
//! envelope's `data` decoded into the caller's type.
//!
//! Downloads are written to a temporary file next to the destination and
//! renamed into place, so a failed download leaves nothing behind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use biou_console_config::ApiConfig;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::ClientError;
use crate::i18n::Locale;
use crate::log::NoopRequestLogSink;
use crate::log::RequestLogEvent;
use crate::log::RequestLogEventParams;
use crate::log::RequestLogSink;
use crate::log::RequestOutcome;
use crate::middleware::Clock;
use crate::middleware::Feedback;
use crate::middleware::IncomingResponse;
use crate::middleware::MultipartBody;
use crate::middleware::OutgoingRequest;
use crate::middleware::Pipeline;
use crate::middleware::ProgressCallback;
use crate::middleware::RequestBody;
use crate::middleware::RequestHook;
use crate::middleware::ResponseHook;
use crate::middleware::ResponseKind;
use crate::middleware::SystemClock;
use crate::middleware::UploadFile;
use crate::notice::Navigator;
use crate::notice::NoopNavigator;
use crate::notice::NoopNoticeSink;
use crate::notice::NoticeSink;
use crate::session::Session;
use crate::transport::ReqwestTransport;
use crate::transport::Transport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name used when a download names none.
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";

// ============================================================================
// SECTION: Options
// ============================================================================

/// Per-call transport options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers.
    pub headers: HeaderMap,
    /// Expected response kind.
    pub response_kind: ResponseKind,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Assembles a [`ConsoleClient`].
pub struct ConsoleClientBuilder {
    /// API settings.
    config: ApiConfig,
    /// Session context; in-memory when unset.
    session: Option<Session>,
    /// Notice destination.
    notices: Arc<dyn NoticeSink>,
    /// Navigation target.
    navigator: Arc<dyn Navigator>,
    /// Request log destination.
    log_sink: Arc<dyn RequestLogSink>,
    /// Notice language.
    locale: Locale,
    /// Cache-buster clock.
    clock: Arc<dyn Clock>,
    /// Transport override.
    transport: Option<Arc<dyn Transport>>,
    /// Caller request hooks, run after the built-ins.
    request_hooks: Vec<Arc<dyn RequestHook>>,
    /// Caller response hooks, run after the built-ins.
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl ConsoleClientBuilder {
    /// Sets the session context.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the notice sink.
    #[must_use]
    pub fn notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Sets the navigator.
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Sets the request log sink.
    #[must_use]
    pub fn log_sink(mut self, log_sink: Arc<dyn RequestLogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    /// Sets the notice language.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the cache-buster clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the reqwest transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Appends a request hook.
    #[must_use]
    pub fn request_hook(mut self, hook: Arc<dyn RequestHook>) -> Self {
        self.request_hooks.push(hook);
        self
    }

    /// Appends a response hook.
    #[must_use]
    pub fn response_hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.response_hooks.push(hook);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn build(self) -> Result<ConsoleClient, ClientError> {
        let session = self.session.unwrap_or_else(Session::in_memory);
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.config.base_url,
                self.config.timeout(),
                self.config.max_response_bytes,
            )?),
        };
        let feedback =
            Arc::new(Feedback::new(session.clone(), self.notices, self.navigator, self.locale));
        let mut pipeline = Pipeline::with_builtins(&session, &feedback, self.clock);
        for hook in self.request_hooks {
            pipeline.push_request_hook(hook);
        }
        for hook in self.response_hooks {
            pipeline.push_response_hook(hook);
        }
        Ok(ConsoleClient {
            session,
            pipeline,
            transport,
            log_sink: self.log_sink,
            feedback,
        })
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Typed request wrapper for the admin log service.
#[derive(Clone)]
pub struct ConsoleClient {
    /// Session context.
    session: Session,
    /// Composed hooks.
    pipeline: Pipeline,
    /// Network transport.
    transport: Arc<dyn Transport>,
    /// Request log destination.
    log_sink: Arc<dyn RequestLogSink>,
    /// Notices and the unauthorized procedure.
    feedback: Arc<Feedback>,
}

impl ConsoleClient {
    /// Starts a builder from API settings.
    #[must_use]
    pub fn builder(config: ApiConfig) -> ConsoleClientBuilder {
        ConsoleClientBuilder {
            config,
            session: None,
            notices: Arc::new(NoopNoticeSink),
            navigator: Arc::new(NoopNavigator),
            log_sink: Arc::new(NoopRequestLogSink),
            locale: Locale::En,
            clock: Arc::new(SystemClock),
            transport: None,
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
        }
    }

    /// Returns the session context.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the notice language.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.feedback.locale()
    }

    /// Sends `GET path?query`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ClientError> {
        self.request(Method::GET, path, query, RequestBody::Empty, RequestOptions::default()).await
    }

    /// Sends `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = json_body(body)?;
        self.request(Method::POST, path, Vec::new(), body, RequestOptions::default()).await
    }

    /// Sends `POST path` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::POST, path, Vec::new(), RequestBody::Empty, RequestOptions::default())
            .await
    }

    /// Sends `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = json_body(body)?;
        self.request(Method::PUT, path, Vec::new(), body, RequestOptions::default()).await
    }

    /// Sends `DELETE path?query`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ClientError> {
        self.request(Method::DELETE, path, query, RequestBody::Empty, RequestOptions::default())
            .await
    }

    /// Sends `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = json_body(body)?;
        self.request(Method::PATCH, path, Vec::new(), body, RequestOptions::default()).await
    }

    /// Posts `file` as multipart field `file` plus extra text `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
        progress: Option<ProgressCallback>,
    ) -> Result<T, ClientError> {
        let body = RequestBody::Multipart(MultipartBody {
            file,
            fields,
            progress,
        });
        self.request(Method::POST, path, Vec::new(), body, RequestOptions::default()).await
    }

    /// Downloads `GET path?query` into `target_dir`.
    ///
    /// The file lands under `file_name` reduced to its last path component,
    /// or [`DEFAULT_DOWNLOAD_NAME`] when none is usable. Returns the final path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails or the file cannot be
    /// written; no partial file is left behind.
    pub async fn download(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        target_dir: &Path,
        file_name: Option<&str>,
    ) -> Result<PathBuf, ClientError> {
        let mut request = OutgoingRequest::new(Method::GET, path);
        request.query = query;
        request.response_kind = ResponseKind::Binary;
        let response = self.execute(request).await?;
        let destination = target_dir.join(sanitize_file_name(file_name));
        let dir = target_dir.to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|err| ClientError::Io(err.to_string()))?;
        let body = response.body;
        let target = destination.clone();
        tokio::task::spawn_blocking(move || persist_download(&dir, &target, &body))
            .await
            .map_err(|err| ClientError::Io(err.to_string()))??;
        Ok(destination)
    }

    /// Sends a request with explicit options and decodes the envelope data.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails at any stage.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let mut request = OutgoingRequest::new(method, path);
        request.query = query;
        request.headers = options.headers;
        request.body = body;
        request.response_kind = options.response_kind;
        let response = self.execute(request).await?;
        decode_data(response)
    }

    /// Runs the pipeline and transport for one request and logs the outcome.
    ///
    /// # Errors
    ///
    /// Returns the error left by the hooks.
    pub async fn execute(&self, request: OutgoingRequest) -> Result<IncomingResponse, ClientError> {
        let started = Instant::now();
        let method = request.method.to_string();
        let path = request.path.clone();
        let request_bytes = request.body.len();
        let (status, response_bytes, result) = match self.pipeline.prepare(request) {
            Ok(prepared) => {
                let sent = self.transport.send(&prepared).await;
                let status = sent.as_ref().ok().map(|response| response.status);
                let response_bytes = sent.as_ref().map(|response| response.body.len()).unwrap_or(0);
                (status, response_bytes, self.pipeline.finish(&prepared, sent))
            }
            Err(err) => (None, 0, Err(err)),
        };
        let business_code = match &result {
            Ok(response) => response.envelope.as_ref().map(|envelope| envelope.code),
            Err(ClientError::Business {
                code, ..
            }) => Some(*code),
            Err(_) => None,
        };
        self.log_sink.record(&RequestLogEvent::new(RequestLogEventParams {
            method,
            path,
            status,
            business_code,
            outcome: if result.is_ok() { RequestOutcome::Success } else { RequestOutcome::Failure },
            error_kind: result.as_ref().err().map(ClientError::kind),
            duration_ms: started.elapsed().as_millis(),
            request_bytes,
            response_bytes,
        }));
        result
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Encodes a serializable value as a JSON body.
fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ClientError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|err| ClientError::InvalidInput(format!("request body: {err}")))
}

/// Decodes the envelope `data` (absent reads as `null`).
fn decode_data<T: DeserializeOwned>(response: IncomingResponse) -> Result<T, ClientError> {
    let data = response.envelope.and_then(|envelope| envelope.data).unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|err| ClientError::Decode(format!("response data: {err}")))
}

/// Converts a flat serializable struct into query pairs.
///
/// `null` fields are omitted, arrays are comma-joined, and nested objects are
/// JSON-encoded.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] when `params` is not an object.
pub fn query_pairs<P: Serialize + ?Sized>(params: &P) -> Result<Vec<(String, String)>, ClientError> {
    let value = serde_json::to_value(params)
        .map_err(|err| ClientError::InvalidInput(format!("query params: {err}")))?;
    let Value::Object(fields) = value else {
        return Err(ClientError::InvalidInput("query params must be an object".to_string()));
    };
    Ok(fields
        .into_iter()
        .filter_map(|(name, value)| query_value(&value).map(|value| (name, value)))
        .collect())
}

/// Renders one query value; `None` for `null`.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            Some(items.iter().filter_map(query_value).collect::<Vec<_>>().join(","))
        }
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Reduces `file_name` to one safe path component.
#[must_use]
pub fn sanitize_file_name(file_name: Option<&str>) -> String {
    file_name
        .map(str::trim)
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string(), str::to_string)
}

/// Writes `body` to a temp file in `dir` and renames it to `target`.
fn persist_download(dir: &Path, target: &Path, body: &Bytes) -> Result<(), ClientError> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|err| ClientError::Io(err.to_string()))?;
    temp.write_all(body).map_err(|err| ClientError::Io(err.to_string()))?;
    temp.as_file().sync_all().map_err(|err| ClientError::Io(err.to_string()))?;
    temp.persist(target).map_err(|err| ClientError::Io(err.error.to_string()))?;
    Ok(())
}
