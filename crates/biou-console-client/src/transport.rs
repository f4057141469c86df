// crates/biou-console-client/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: Sends prepared requests over reqwest.
// Purpose: Isolate network I/O behind a trait the client can swap in tests.
// Dependencies: async-trait, bytes, futures-util, reqwest, url
// ============================================================================

//! ## Overview
//! A [`Transport`] turns an [`OutgoingRequest`] into an [`IncomingResponse`]
//! without interpreting the status or body. Failures that leave no response
//! are reported as [`ClientError::Network`] for the middleware to classify.
//!
//! Security posture: response bodies are untrusted and read under a hard
//! byte cap; redirects are not followed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Body;
use reqwest::Client;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use reqwest::redirect::Policy;
use url::Url;

use crate::error::ClientError;
use crate::middleware::IncomingResponse;
use crate::middleware::MultipartBody;
use crate::middleware::OutgoingRequest;
use crate::middleware::ProgressCallback;
use crate::middleware::RequestBody;
use crate::middleware::UploadFile;
use crate::models::upload::UploadProgress;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Size of each upload chunk handed to the transport.
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// MIME type used when an upload names none.
const DEFAULT_UPLOAD_MIME: &str = "application/octet-stream";

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sends one request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when no response arrives and
    /// [`ClientError::ResponseTooLarge`] when the body exceeds the cap.
    async fn send(&self, request: &OutgoingRequest) -> Result<IncomingResponse, ClientError>;
}

// ============================================================================
// SECTION: Reqwest Transport
// ============================================================================

/// Transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// HTTP client.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Response body cap.
    max_response_bytes: usize,
}

impl ReqwestTransport {
    /// Builds a transport for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_response_bytes,
        })
    }

    /// Resolves the request path and query against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] when the result is not a URL.
    pub fn request_url(&self, request: &OutgoingRequest) -> Result<Url, ClientError> {
        let separator = if request.path.starts_with('/') { "" } else { "/" };
        let mut url = Url::parse(&format!("{}{separator}{}", self.base_url, request.path))
            .map_err(|err| ClientError::InvalidInput(format!("invalid request url: {err}")))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<IncomingResponse, ClientError> {
        let url = self.request_url(request)?;
        let mut builder =
            self.client.request(request.method.clone(), url).headers(request.headers.clone());
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(body) => builder.multipart(multipart_form(body)?),
        };
        let response = builder.send().await.map_err(|err| ClientError::Network {
            message: err.to_string(),
        })?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = read_response_body_with_limit(response, self.max_response_bytes).await?;
        Ok(IncomingResponse::new(status, headers, body))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the multipart form: the file under `file`, then the text fields.
fn multipart_form(body: &MultipartBody) -> Result<Form, ClientError> {
    let mut form = Form::new().part("file", file_part(&body.file, body.progress.clone())?);
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    Ok(form)
}

/// Streams the file in fixed chunks, reporting progress as each is taken.
fn file_part(file: &UploadFile, progress: Option<ProgressCallback>) -> Result<Part, ClientError> {
    let total = file.bytes.len() as u64;
    let chunks = split_chunks(&file.bytes);
    let name = file.file_name.clone();
    let mut sent: u64 = 0;
    let stream = futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
        sent = sent.saturating_add(chunk.len() as u64);
        if let Some(callback) = &progress {
            callback(&UploadProgress::new(&name, sent, total));
        }
        Ok::<Bytes, std::io::Error>(chunk)
    }));
    let mime = file.content_type.as_deref().unwrap_or(DEFAULT_UPLOAD_MIME);
    Part::stream_with_length(Body::wrap_stream(stream), total)
        .file_name(file.file_name.clone())
        .mime_str(mime)
        .map_err(|err| ClientError::InvalidInput(format!("invalid content type: {err}")))
}

/// Splits `bytes` into upload chunks; an empty file yields one empty chunk.
fn split_chunks(bytes: &Bytes) -> Vec<Bytes> {
    if bytes.is_empty() {
        return vec![Bytes::new()];
    }
    (0 .. bytes.len())
        .step_by(UPLOAD_CHUNK_BYTES)
        .map(|start| bytes.slice(start .. (start + UPLOAD_CHUNK_BYTES).min(bytes.len())))
        .collect()
}

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Bytes, ClientError> {
    let mut body = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) = response.chunk().await.map_err(|err| ClientError::Network {
        message: err.to_string(),
    })? {
        let next_total = total.checked_add(chunk.len()).ok_or(ClientError::ResponseTooLarge {
            actual: usize::MAX,
            limit,
        })?;
        if next_total > limit {
            return Err(ClientError::ResponseTooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
        total = next_total;
    }
    Ok(Bytes::from(body))
}
