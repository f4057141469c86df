// crates/biou-console-client/tests/http_client.rs
// ============================================================================
// Module: HTTP Client Integration Tests
// Description: End-to-end wrapper behavior against a mock server.
// Purpose: Validate headers, stamps, error handling, uploads, and downloads.
// Dependencies: biou-console-client, tempfile, tiny_http, tokio
// ============================================================================

//! ## Overview
//! Runs the full middleware chain over the reqwest transport. Each test
//! starts its own mock server and asserts on both the captured request and
//! the client-side outcome.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::sync::Mutex;

use biou_console_client::ClientError;
use biou_console_client::LOGIN_ROUTE;
use biou_console_client::UploadFile;
use biou_console_client::log::RequestOutcome;
use biou_console_client::middleware::ProgressCallback;
use biou_console_client::models::UploadProgress;
use biou_console_client::session::Theme;
use serde_json::Value;
use serde_json::json;

use crate::common::MockResponse;
use crate::common::MockServer;
use crate::common::api_config;
use crate::common::harness;
use crate::common::harness_with;
use crate::common::unused_base_url;

// ============================================================================
// SECTION: Request Phase
// ============================================================================

#[tokio::test]
async fn get_carries_bearer_token_and_cache_stamp() {
    let server = MockServer::start(|_| MockResponse::ok(json!({"name": "biou"})));
    let harness = harness(&server.base_url());
    harness.session.store_token("secret-token").unwrap();

    let data: Value = harness.client.get("/system/info", Vec::new()).await.unwrap();
    assert_eq!(data, json!({"name": "biou"}));

    let request = server.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/api/system/info");
    assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
    let stamp: u64 = request.query_value("_t").unwrap().parse().unwrap();
    assert!(stamp > 0);
}

#[tokio::test]
async fn anonymous_requests_have_no_authorization_header() {
    let server = MockServer::start(|_| MockResponse::ok(Value::Null));
    let harness = harness(&server.base_url());
    let _: Value = harness.client.post("/auth/login", &json!({"username": "a"})).await.unwrap();
    assert_eq!(server.single_request().header("authorization"), None);
}

#[tokio::test]
async fn consecutive_gets_use_distinct_stamps() {
    let server = MockServer::start(|_| MockResponse::ok(Value::Null));
    let harness = harness(&server.base_url());
    let _: Value = harness.client.get("/system/health", Vec::new()).await.unwrap();
    let _: Value = harness.client.get("/system/health", Vec::new()).await.unwrap();
    let stamps: Vec<String> =
        server.requests().iter().map(|request| request.query_value("_t").unwrap()).collect();
    assert_eq!(stamps.len(), 2);
    assert_ne!(stamps[0], stamps[1]);
}

#[tokio::test]
async fn caller_stamp_and_params_are_sent_verbatim() {
    let server = MockServer::start(|_| MockResponse::ok(Value::Null));
    let harness = harness(&server.base_url());
    let query = vec![
        ("days".to_string(), "30".to_string()),
        ("_t".to_string(), "fixed".to_string()),
    ];
    let _: Value = harness.client.get("/log/statistics", query).await.unwrap();
    let request = server.single_request();
    assert_eq!(
        request.query(),
        vec![("days".to_string(), "30".to_string()), ("_t".to_string(), "fixed".to_string())]
    );
}

#[tokio::test]
async fn post_sends_json_body_without_stamp() {
    let server = MockServer::start(|_| MockResponse::ok(json!(5)));
    let harness = harness(&server.base_url());
    let count: u64 = harness.client.post("/log/audit", &json!({"module": "user"})).await.unwrap();
    assert_eq!(count, 5);
    let request = server.single_request();
    assert_eq!(request.json(), json!({"module": "user"}));
    assert_eq!(request.query_value("_t"), None);
    assert!(request.header("content-type").unwrap().starts_with("application/json"));
}

// ============================================================================
// SECTION: Response Phase
// ============================================================================

#[tokio::test]
async fn success_resolves_with_exactly_the_data_field() {
    let server = MockServer::start(|_| MockResponse::ok(json!({"records": [], "total": 0})));
    let harness = harness(&server.base_url());
    let data: Value = harness.client.get("/x", Vec::new()).await.unwrap();
    assert_eq!(data, json!({"records": [], "total": 0}));
    assert!(harness.notices.notices().is_empty());
}

#[tokio::test]
async fn absent_data_decodes_as_unit_like_values() {
    let server = MockServer::start(|_| MockResponse::json(200, &json!({"code": 200, "message": "ok"})));
    let harness = harness(&server.base_url());
    let data: Option<u64> = harness.client.delete("/user/3", Vec::new()).await.unwrap();
    assert_eq!(data, None);
}

#[tokio::test]
async fn business_unauthorized_clears_session_and_navigates() {
    let server = MockServer::start(|_| MockResponse::business(401, "token invalid"));
    let harness = harness(&server.base_url());
    harness.session.store_token("stale").unwrap();
    harness.session.set_theme(Theme::Dark).unwrap();

    let err = harness.client.get::<Value>("/auth/current-user", Vec::new()).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Unauthorized {
            message: "token invalid".to_string(),
        }
    );
    assert_eq!(harness.session.token().unwrap(), None);
    assert_eq!(harness.session.theme().unwrap(), Theme::Dark);
    assert_eq!(harness.navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
    assert_eq!(harness.notices.notices().len(), 1);
}

#[tokio::test]
async fn http_unauthorized_runs_the_same_procedure() {
    let server = MockServer::start(|_| MockResponse::status(401));
    let harness = harness(&server.base_url());
    harness.session.store_token("stale").unwrap();
    let err = harness.client.get::<Value>("/system/info", Vec::new()).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!harness.session.is_authenticated().unwrap());
    assert_eq!(harness.navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
}

#[tokio::test]
async fn http_server_error_raises_fixed_notice() {
    let server = MockServer::start(|_| MockResponse::status(500));
    let harness = harness(&server.base_url());
    harness.session.store_token("kept").unwrap();
    let err = harness.client.get::<Value>("/system/info", Vec::new()).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::HttpStatus {
            status: 500,
            message: "Internal server error. Please try again later.".to_string(),
        }
    );
    assert_eq!(harness.session.token().unwrap().as_deref(), Some("kept"));
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test]
async fn redirects_are_not_followed() {
    let server = MockServer::start(|_| MockResponse::status(302));
    let harness = harness(&server.base_url());
    let err = harness.client.get::<Value>("/system/info", Vec::new()).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::HttpStatus {
            status: 302,
            message: "Request failed: 302".to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error_with_storage_untouched() {
    let harness = harness(&unused_base_url());
    harness.session.store_token("kept").unwrap();
    let err = harness.client.get::<Value>("/system/info", Vec::new()).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Network {
            message: "Network connection failed. Check your network settings.".to_string(),
        }
    );
    assert_eq!(harness.session.token().unwrap().as_deref(), Some("kept"));
    assert!(harness.navigator.routes().is_empty());
    assert_eq!(harness.notices.notices().len(), 1);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let server = MockServer::start(|_| MockResponse::ok(json!("x".repeat(4096))));
    let mut config = api_config(&server.base_url());
    config.max_response_bytes = 1024;
    let harness = harness_with(config);
    let err = harness.client.get::<Value>("/system/info", Vec::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::ResponseTooLarge { limit: 1024, .. }));
}

#[tokio::test]
async fn undecodable_data_is_a_decode_error() {
    let server = MockServer::start(|_| MockResponse::ok(json!("not a number")));
    let harness = harness(&server.base_url());
    let err = harness.client.get::<u64>("/log/clean", Vec::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

// ============================================================================
// SECTION: Request Log
// ============================================================================

#[tokio::test]
async fn request_log_records_outcome_without_secrets() {
    let server = MockServer::start(|request| {
        if request.path().ends_with("/fail") {
            MockResponse::business(400, "bad")
        } else {
            MockResponse::ok(Value::Null)
        }
    });
    let harness = harness(&server.base_url());
    harness.session.store_token("very-secret").unwrap();
    let _: Value = harness.client.get("/ok", Vec::new()).await.unwrap();
    let _ = harness.client.post::<Value, _>("/fail", &json!({"password": "hunter2"})).await;

    let events = harness.logs.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, "http_request");
    assert_eq!(events[0].method, "GET");
    assert_eq!(events[0].path, "/ok");
    assert_eq!(events[0].status, Some(200));
    assert_eq!(events[0].outcome, RequestOutcome::Success);
    assert_eq!(events[1].business_code, Some(400));
    assert_eq!(events[1].outcome, RequestOutcome::Failure);
    assert_eq!(events[1].error_kind, Some("business"));
    assert!(events[1].request_bytes > 0);
    for event in events {
        let line = serde_json::to_string(&event).unwrap();
        assert!(!line.contains("very-secret"));
        assert!(!line.contains("hunter2"));
    }
}

// ============================================================================
// SECTION: Upload
// ============================================================================

#[tokio::test]
async fn upload_sends_file_field_extra_fields_and_progress() {
    let server = MockServer::start(|_| MockResponse::ok(json!({"url": "/files/a.txt"})));
    let harness = harness(&server.base_url());
    let reports: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let progress: ProgressCallback = Arc::new(move |report: &UploadProgress| {
        sink.lock().unwrap().push(report.clone());
    });
    let payload = vec![b'a'; 150 * 1024];
    let file = UploadFile::new("a.txt", payload.clone()).with_content_type("text/plain");
    let fields = vec![("type".to_string(), "document".to_string())];

    let data: Value =
        harness.client.upload("/upload/file", file, fields, Some(progress)).await.unwrap();
    assert_eq!(data, json!({"url": "/files/a.txt"}));

    let request = server.single_request();
    assert_eq!(request.method, "POST");
    assert!(request.header("content-type").unwrap().starts_with("multipart/form-data"));
    let text = request.text();
    assert!(text.contains("name=\"file\"; filename=\"a.txt\""));
    assert!(text.contains("name=\"type\""));
    assert!(text.contains("document"));

    let reports = reports.lock().unwrap().clone();
    assert!(reports.len() >= 3);
    let last = reports.last().unwrap();
    assert_eq!(last.bytes_sent, payload.len() as u64);
    assert_eq!(last.total_bytes, payload.len() as u64);
    assert!((last.percent - 100.0).abs() < f64::EPSILON);
    assert!(reports.windows(2).all(|pair| pair[0].bytes_sent < pair[1].bytes_sent));
}

// ============================================================================
// SECTION: Download
// ============================================================================

#[tokio::test]
async fn download_writes_body_under_default_name() {
    let server = MockServer::start(|_| MockResponse::binary(b"sheet-bytes"));
    let harness = harness(&server.base_url());
    let dir = tempfile::tempdir().unwrap();
    let path = harness.client.download("/file", Vec::new(), dir.path(), None).await.unwrap();
    assert_eq!(path, dir.path().join("download"));
    assert_eq!(std::fs::read(&path).unwrap(), b"sheet-bytes");
}

#[tokio::test]
async fn download_names_are_reduced_to_one_component() {
    let server = MockServer::start(|_| MockResponse::binary(b"x"));
    let harness = harness(&server.base_url());
    let dir = tempfile::tempdir().unwrap();
    let path = harness
        .client
        .download("/file", Vec::new(), dir.path(), Some("../../etc/report.xlsx"))
        .await
        .unwrap();
    assert_eq!(path, dir.path().join("report.xlsx"));
    assert!(path.exists());
}

#[tokio::test]
async fn failed_download_leaves_no_files_behind() {
    let server = MockServer::start(|_| MockResponse::business(500, "export failed"));
    let harness = harness(&server.base_url());
    let dir = tempfile::tempdir().unwrap();
    let err = harness
        .client
        .download("/log/audit/export", Vec::new(), dir.path(), Some("audit.xlsx"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Business {
            code: 500,
            message: "export failed".to_string(),
        }
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
