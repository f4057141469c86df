// crates/biou-console-client/src/tests/middleware.rs
// ============================================================================
// Module: Middleware Tests
// Description: Unit tests for the built-in request and response hooks.
// Purpose: Pin header injection, cache busting, and failure classification.
// Dependencies: biou-console-client middleware module
// ============================================================================

//! ## Overview
//! Drives a [`Pipeline`] directly with synthetic responses so every branch
//! of the classification table is covered without a server.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde_json::json;

use crate::error::ClientError;
use crate::i18n::Locale;
use crate::middleware::CACHE_BUST_PARAM;
use crate::middleware::Clock;
use crate::middleware::Feedback;
use crate::middleware::IncomingResponse;
use crate::middleware::OutgoingRequest;
use crate::middleware::Pipeline;
use crate::middleware::RequestHook;
use crate::middleware::ResponseKind;
use crate::notice::LOGIN_ROUTE;
use crate::notice::NoticeLevel;
use crate::notice::RecordingNavigator;
use crate::notice::RecordingNoticeSink;
use crate::session::Session;
use crate::session::Theme;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

struct Fixture {
    session: Session,
    notices: Arc<RecordingNoticeSink>,
    navigator: Arc<RecordingNavigator>,
    pipeline: Pipeline,
}

fn fixture(locale: Locale) -> Fixture {
    let session = Session::in_memory();
    let notices = Arc::new(RecordingNoticeSink::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let feedback =
        Arc::new(Feedback::new(session.clone(), notices.clone(), navigator.clone(), locale));
    let pipeline = Pipeline::with_builtins(&session, &feedback, Arc::new(FixedClock(1_700_000_000_000)));
    Fixture {
        session,
        notices,
        navigator,
        pipeline,
    }
}

fn json_response(status: u16, body: serde_json::Value) -> IncomingResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    IncomingResponse::new(status, headers, Bytes::from(body.to_string()))
}

fn signed_in(fixture: &Fixture) {
    fixture.session.store_token("token-abc").unwrap();
    fixture.session.set_theme(Theme::Dark).unwrap();
}

// ============================================================================
// SECTION: Request Hooks
// ============================================================================

#[test]
fn bearer_header_is_attached_only_when_a_token_is_stored() {
    let fixture = fixture(Locale::En);
    let anonymous = fixture.pipeline.prepare(OutgoingRequest::new(Method::POST, "/auth/login")).unwrap();
    assert!(anonymous.headers.get(AUTHORIZATION).is_none());

    signed_in(&fixture);
    let authed = fixture.pipeline.prepare(OutgoingRequest::new(Method::POST, "/log/audit/page")).unwrap();
    assert_eq!(authed.headers.get(AUTHORIZATION).unwrap(), "Bearer token-abc");
}

#[test]
fn get_requests_receive_strictly_increasing_cache_stamps() {
    let fixture = fixture(Locale::En);
    let first = fixture.pipeline.prepare(OutgoingRequest::new(Method::GET, "/system/info")).unwrap();
    let second = fixture.pipeline.prepare(OutgoingRequest::new(Method::GET, "/system/info")).unwrap();
    let first_stamp: u64 = first.query_value(CACHE_BUST_PARAM).unwrap().parse().unwrap();
    let second_stamp: u64 = second.query_value(CACHE_BUST_PARAM).unwrap().parse().unwrap();
    assert_eq!(first_stamp, 1_700_000_000_000);
    assert!(second_stamp > first_stamp);
}

#[test]
fn caller_cache_stamp_is_kept_and_not_duplicated() {
    let fixture = fixture(Locale::En);
    let mut request = OutgoingRequest::new(Method::GET, "/log/statistics");
    request.query.push(("days".to_string(), "7".to_string()));
    request.query.push((CACHE_BUST_PARAM.to_string(), "caller".to_string()));
    let prepared = fixture.pipeline.prepare(request).unwrap();
    let stamps: Vec<&str> = prepared
        .query
        .iter()
        .filter(|(name, _)| name == CACHE_BUST_PARAM)
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(stamps, vec!["caller"]);
    assert_eq!(prepared.query_value("days"), Some("7"));
}

#[test]
fn non_get_requests_are_not_stamped() {
    let fixture = fixture(Locale::En);
    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let prepared = fixture.pipeline.prepare(OutgoingRequest::new(method, "/user/1")).unwrap();
        assert!(prepared.query_value(CACHE_BUST_PARAM).is_none());
    }
}

#[test]
fn appended_request_hooks_run_after_builtins() {
    struct RequireAuth;

    impl RequestHook for RequireAuth {
        fn before_send(&self, request: OutgoingRequest) -> Result<OutgoingRequest, ClientError> {
            if request.headers.contains_key(AUTHORIZATION) {
                Ok(request)
            } else {
                Err(ClientError::InvalidInput("missing auth".to_string()))
            }
        }
    }

    let mut fixture = fixture(Locale::En);
    fixture.pipeline.push_request_hook(Arc::new(RequireAuth));
    assert!(fixture.pipeline.prepare(OutgoingRequest::new(Method::GET, "/a")).is_err());
    signed_in(&fixture);
    assert!(fixture.pipeline.prepare(OutgoingRequest::new(Method::GET, "/a")).is_ok());
}

// ============================================================================
// SECTION: Response Hooks
// ============================================================================

#[test]
fn transport_failure_becomes_localized_network_error() {
    let fixture = fixture(Locale::ZhCn);
    signed_in(&fixture);
    let request = OutgoingRequest::new(Method::GET, "/system/info");
    let result = fixture.pipeline.finish(
        &request,
        Err(ClientError::Network {
            message: "connection refused".to_string(),
        }),
    );
    assert_eq!(
        result.unwrap_err(),
        ClientError::Network {
            message: "网络连接异常，请检查网络设置".to_string(),
        }
    );
    assert_eq!(fixture.notices.notices().len(), 1);
    assert_eq!(fixture.session.token().unwrap().as_deref(), Some("token-abc"));
    assert!(fixture.navigator.routes().is_empty());
}

#[test]
fn http_unauthorized_clears_credentials_and_navigates_to_login() {
    let fixture = fixture(Locale::En);
    signed_in(&fixture);
    fixture.session.store_user_info(&crate::models::auth::UserInfo::default()).unwrap();
    let request = OutgoingRequest::new(Method::GET, "/auth/current-user");
    let result = fixture.pipeline.finish(&request, Ok(json_response(401, json!({}))));
    let err = result.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(fixture.session.token().unwrap(), None);
    assert_eq!(fixture.session.refresh_token().unwrap(), None);
    assert_eq!(fixture.session.user_info().unwrap(), None);
    assert_eq!(fixture.session.theme().unwrap(), Theme::Dark);
    assert_eq!(fixture.navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
    let notices = fixture.notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Session expired. Please sign in again.");
}

#[test]
fn http_statuses_map_to_fixed_messages() {
    let cases = [
        (403, "权限不足，请联系管理员"),
        (404, "请求的接口不存在"),
        (500, "服务器内部错误，请稍后重试"),
        (502, "请求失败: 502"),
    ];
    for (status, expected) in cases {
        let fixture = fixture(Locale::ZhCn);
        let request = OutgoingRequest::new(Method::GET, "/system/health");
        let result = fixture.pipeline.finish(&request, Ok(json_response(status, json!({}))));
        assert_eq!(
            result.unwrap_err(),
            ClientError::HttpStatus {
                status,
                message: expected.to_string(),
            }
        );
        assert_eq!(fixture.notices.notices()[0].message, expected);
        assert!(fixture.navigator.routes().is_empty());
    }
}

#[test]
fn success_envelope_is_attached_to_the_response() {
    let fixture = fixture(Locale::En);
    let request = OutgoingRequest::new(Method::GET, "/system/info");
    let response = fixture
        .pipeline
        .finish(&request, Ok(json_response(200, json!({"code": 200, "message": "ok", "data": {"a": 1}}))))
        .unwrap();
    let envelope = response.envelope.unwrap();
    assert_eq!(envelope.data, Some(json!({"a": 1})));
    assert!(fixture.notices.notices().is_empty());
}

#[test]
fn business_forbidden_keeps_server_message_and_shows_fixed_notice() {
    let fixture = fixture(Locale::En);
    signed_in(&fixture);
    let request = OutgoingRequest::new(Method::DELETE, "/user/7");
    let result = fixture.pipeline.finish(
        &request,
        Ok(json_response(200, json!({"code": 403, "message": "no delete permission", "data": null}))),
    );
    assert_eq!(
        result.unwrap_err(),
        ClientError::Business {
            code: 403,
            message: "no delete permission".to_string(),
        }
    );
    assert_eq!(
        fixture.notices.notices()[0].message,
        "Insufficient privileges. Please contact an administrator."
    );
    assert_eq!(fixture.session.token().unwrap().as_deref(), Some("token-abc"));
}

#[test]
fn business_unauthorized_runs_the_unauthorized_procedure() {
    let fixture = fixture(Locale::En);
    signed_in(&fixture);
    let request = OutgoingRequest::new(Method::GET, "/log/statistics");
    let result = fixture.pipeline.finish(
        &request,
        Ok(json_response(200, json!({"code": 401, "message": "token expired"}))),
    );
    assert_eq!(
        result.unwrap_err(),
        ClientError::Unauthorized {
            message: "token expired".to_string(),
        }
    );
    assert_eq!(fixture.session.token().unwrap(), None);
    assert_eq!(fixture.navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
}

#[test]
fn business_failure_without_message_uses_generic_fallback() {
    let fixture = fixture(Locale::En);
    let request = OutgoingRequest::new(Method::POST, "/user");
    let result =
        fixture.pipeline.finish(&request, Ok(json_response(200, json!({"code": 400, "message": ""}))));
    assert_eq!(
        result.unwrap_err(),
        ClientError::Business {
            code: 400,
            message: "Request failed".to_string(),
        }
    );
}

#[test]
fn business_not_found_shows_resource_notice() {
    let fixture = fixture(Locale::En);
    let request = OutgoingRequest::new(Method::GET, "/user/99");
    let result = fixture.pipeline.finish(
        &request,
        Ok(json_response(200, json!({"code": 404, "message": "user 99 missing"}))),
    );
    assert_eq!(
        result.unwrap_err(),
        ClientError::Business {
            code: 404,
            message: "user 99 missing".to_string(),
        }
    );
    let notices = fixture.notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "The requested resource does not exist.");
}

#[test]
fn body_without_envelope_is_a_failed_call_with_notice() {
    let bodies: [&[u8]; 3] = [b"<html>", b"", b"Bad Gateway"];
    for body in bodies {
        let fixture = fixture(Locale::En);
        let request = OutgoingRequest::new(Method::GET, "/system/info");
        let response = IncomingResponse::new(200, HeaderMap::new(), Bytes::copy_from_slice(body));
        let err = fixture.pipeline.finish(&request, Ok(response)).unwrap_err();
        assert_eq!(
            err,
            ClientError::Business {
                code: 0,
                message: "Request failed".to_string(),
            }
        );
        assert!(err.raises_notice());
        let notices = fixture.notices.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Request failed");
        assert!(fixture.navigator.routes().is_empty());
    }
}

#[test]
fn binary_responses_skip_validation_unless_json() {
    let fixture = fixture(Locale::En);
    let mut request = OutgoingRequest::new(Method::GET, "/log/audit/export");
    request.response_kind = ResponseKind::Binary;

    let raw = IncomingResponse::new(200, HeaderMap::new(), Bytes::from_static(b"PK\x03\x04"));
    let passed = fixture.pipeline.finish(&request, Ok(raw)).unwrap();
    assert_eq!(passed.body.as_ref(), b"PK\x03\x04");
    assert!(passed.envelope.is_none());

    let error = json_response(200, json!({"code": 500, "message": "export failed"}));
    let result = fixture.pipeline.finish(&request, Ok(error));
    assert_eq!(
        result.unwrap_err(),
        ClientError::Business {
            code: 500,
            message: "export failed".to_string(),
        }
    );
}
