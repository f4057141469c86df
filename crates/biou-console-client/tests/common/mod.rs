// crates/biou-console-client/tests/common/mod.rs
// ============================================================================
// Module: Client Test Support
// Description: Mock HTTP server and client fixtures for integration tests.
// Purpose: Capture requests and script envelope responses per path.
// Dependencies: biou-console-client, tiny_http, url
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a different subset.")]

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use biou_console_client::ConsoleClient;
use biou_console_client::Session;
use biou_console_client::log::RequestLogEvent;
use biou_console_client::log::RequestLogSink;
use biou_console_client::notice::RecordingNavigator;
use biou_console_client::notice::RecordingNoticeSink;
use biou_console_config::ApiConfig;
use biou_console_config::DEFAULT_MAX_RESPONSE_BYTES;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Captured Requests
// ============================================================================

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Raw request target including the query string.
    pub url: String,
    /// Header pairs with lowercase names.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// Returns the path without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or("")
    }

    /// Returns decoded query pairs.
    pub fn query(&self) -> Vec<(String, String)> {
        let parsed = url::Url::parse(&format!("http://mock{}", self.url)).unwrap();
        parsed.query_pairs().map(|(name, value)| (name.into_owned(), value.into_owned())).collect()
    }

    /// Returns the first value of query parameter `name`.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.query().into_iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Returns the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// Returns the body as lossy text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// SECTION: Scripted Responses
// ============================================================================

/// A scripted response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status.
    pub status: u16,
    /// Content type header.
    pub content_type: Option<&'static str>,
    /// Body bytes.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// A success envelope carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self::json(200, &json!({"code": 200, "message": "success", "data": data, "timestamp": 1}))
    }

    /// A business failure envelope under HTTP 200.
    pub fn business(code: i64, message: &str) -> Self {
        Self::json(200, &json!({"code": code, "message": message, "data": null}))
    }

    /// A JSON body with an explicit status.
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: serde_json::to_vec(value).unwrap(),
        }
    }

    /// An empty body with an explicit status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// A spreadsheet download.
    pub fn binary(body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            body: body.to_vec(),
        }
    }
}

// ============================================================================
// SECTION: Mock Server
// ============================================================================

/// Threaded tiny_http server that records every request.
pub struct MockServer {
    addr: SocketAddr,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    /// Starts a server answering each request with `responder`.
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&CapturedRequest) -> MockResponse + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let thread_server = Arc::clone(&server);
        let thread_requests = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for mut request in thread_server.incoming_requests() {
                let mut body = Vec::new();
                let _ = request.as_reader().read_to_end(&mut body);
                let captured = CapturedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|header| {
                            (header.field.to_string().to_ascii_lowercase(), header.value.to_string())
                        })
                        .collect(),
                    body,
                };
                let scripted = responder(&captured);
                thread_requests.lock().unwrap().push(captured);
                let mut response =
                    Response::from_data(scripted.body).with_status_code(scripted.status);
                if let Some(content_type) = scripted.content_type {
                    response = response.with_header(
                        Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()).unwrap(),
                    );
                }
                let _ = request.respond(response);
            }
        });
        Self {
            addr,
            server,
            requests,
            handle: Some(handle),
        }
    }

    /// Returns the API base URL served by this mock.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Returns the captured requests in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the only captured request.
    pub fn single_request(&self) -> CapturedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// SECTION: Client Fixtures
// ============================================================================

/// Request log sink that keeps every event.
#[derive(Default)]
pub struct RecordingLogSink {
    events: Mutex<Vec<RequestLogEvent>>,
}

impl RecordingLogSink {
    /// Returns the recorded events.
    pub fn events(&self) -> Vec<RequestLogEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RequestLogSink for RecordingLogSink {
    fn record(&self, event: &RequestLogEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A client wired to recording collaborators.
pub struct Harness {
    pub client: ConsoleClient,
    pub session: Session,
    pub notices: Arc<RecordingNoticeSink>,
    pub navigator: Arc<RecordingNavigator>,
    pub logs: Arc<RecordingLogSink>,
}

/// API settings pointing at `base_url`.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
    }
}

/// Builds a harness against `config` with an in-memory session.
pub fn harness_with(config: ApiConfig) -> Harness {
    let session = Session::in_memory();
    let notices = Arc::new(RecordingNoticeSink::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let logs = Arc::new(RecordingLogSink::default());
    let client = ConsoleClient::builder(config)
        .session(session.clone())
        .notices(notices.clone())
        .navigator(navigator.clone())
        .log_sink(logs.clone())
        .build()
        .unwrap();
    Harness {
        client,
        session,
        notices,
        navigator,
        logs,
    }
}

/// Builds a harness against `base_url`.
pub fn harness(base_url: &str) -> Harness {
    harness_with(api_config(base_url))
}

/// Returns a base URL on a port nothing listens on.
pub fn unused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}
