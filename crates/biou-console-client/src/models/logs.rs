// crates/biou-console-client/src/models/logs.rs
// ============================================================================
// Module: Log Models
// Description: Audit, system, and login log records with their filters.
// Purpose: Type the `/log` endpoints and map log kinds to paths and files.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each log kind has a filter struct (every field optional) and a record
//! struct. Paged queries wrap a filter in [`Paged`], which flattens the page
//! fields and the filter into one JSON object.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::envelope::PageQuery;

/// Log families served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Operation audit trail.
    Audit,
    /// Application log lines.
    System,
    /// Sign-in attempts.
    Login,
}

impl LogKind {
    /// All kinds in display order.
    pub const ALL: [Self; 3] = [Self::Audit, Self::System, Self::Login];

    /// Path segment under `/log`.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::System => "system",
            Self::Login => "login",
        }
    }

    /// Key used by the backend statistics map.
    #[must_use]
    pub const fn statistics_key(self) -> &'static str {
        match self {
            Self::Audit => "auditLog",
            Self::System => "systemLog",
            Self::Login => "loginLog",
        }
    }

    /// Default file name for exports.
    #[must_use]
    pub const fn export_file_name(self) -> &'static str {
        match self {
            Self::Audit => "audit-logs.xlsx",
            Self::System => "system-logs.xlsx",
            Self::Login => "login-logs.xlsx",
        }
    }

    /// Parses a path segment.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment().eq_ignore_ascii_case(value.trim()))
    }
}

/// A filter combined with page fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paged<F> {
    /// Page number and size.
    #[serde(flatten)]
    pub page: PageQuery,
    /// Resource filter.
    #[serde(flatten)]
    pub filter: F,
}

impl<F> Paged<F> {
    /// Wraps `filter` with page fields.
    pub const fn new(page: PageQuery, filter: F) -> Self {
        Self {
            page,
            filter,
        }
    }
}

/// Counters per log kind, for example `auditLog -> {total, success, fail}`.
pub type LogStatistics = BTreeMap<String, BTreeMap<String, u64>>;

/// Audit log filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilter {
    /// Acting user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Acting user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Operation type such as `CREATE` or `EXPORT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    /// Business type such as `USER` or `LOG`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    /// Module name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Inclusive lower bound (`YYYY-MM-DD HH:mm:ss`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Inclusive upper bound (`YYYY-MM-DD HH:mm:ss`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// 1 success, 0 failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Client address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// System log filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLogFilter {
    /// Level such as `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Logger name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    /// Message substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Thread name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    /// Emitting class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Emitting method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
}

/// Login log filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginLogFilter {
    /// Account name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Login type such as `PASSWORD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_type: Option<String>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// 1 success, 0 failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Client address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Client user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Resolved location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Audit log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditLog {
    /// Record id.
    pub id: i64,
    /// Acting user id.
    pub user_id: Option<i64>,
    /// Acting user name.
    pub username: Option<String>,
    /// Operation type.
    pub operation_type: Option<String>,
    /// Business type.
    pub business_type: Option<String>,
    /// Module name.
    pub module: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Handler method.
    pub method: Option<String>,
    /// Request URL.
    pub request_url: Option<String>,
    /// HTTP method.
    pub request_method: Option<String>,
    /// Serialized request parameters.
    pub request_params: Option<String>,
    /// Serialized response.
    pub response_data: Option<String>,
    /// Client address.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// 1 success, 0 failure.
    pub status: i32,
    /// Failure detail.
    pub error_message: Option<String>,
    /// Handler time in milliseconds.
    pub execution_time: i64,
    /// Creation time.
    pub create_time: Option<String>,
}

/// System log record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemLog {
    /// Record id.
    pub id: i64,
    /// Level.
    pub level: Option<String>,
    /// Logger name.
    pub logger: Option<String>,
    /// Log message.
    pub message: Option<String>,
    /// Thread name.
    pub thread: Option<String>,
    /// Emitting class.
    pub class_name: Option<String>,
    /// Emitting method.
    pub method_name: Option<String>,
    /// Source line.
    pub line_number: Option<i64>,
    /// Exception text.
    pub exception: Option<String>,
    /// Creation time.
    pub create_time: Option<String>,
}

/// Login log record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginLog {
    /// Record id.
    pub id: i64,
    /// Account name.
    pub username: Option<String>,
    /// Login type.
    pub login_type: Option<String>,
    /// Client address.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Resolved location.
    pub location: Option<String>,
    /// 1 success, 0 failure.
    pub status: i32,
    /// Failure detail.
    pub error_message: Option<String>,
    /// Attempt time.
    pub login_time: Option<String>,
}
