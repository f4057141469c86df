// crates/biou-console-client/src/api/logs.rs
// ============================================================================
// Module: Log API
// Description: Paged and unpaged log queries, statistics, cleanup, export.
// Purpose: Map each log operation to its fixed `/log` path.
// Dependencies: biou-console-client::{client, envelope, models}
// ============================================================================

//! ## Overview
//! Query operations validate their page fields before sending. Exports are
//! downloads whose query string is built from the filter with unset fields
//! omitted.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ConsoleClient;
use crate::client::query_pairs;
use crate::envelope::PageQuery;
use crate::envelope::PageResult;
use crate::error::ClientError;
use crate::models::logs::AuditLog;
use crate::models::logs::AuditLogFilter;
use crate::models::logs::LogKind;
use crate::models::logs::LogStatistics;
use crate::models::logs::LoginLog;
use crate::models::logs::LoginLogFilter;
use crate::models::logs::Paged;
use crate::models::logs::SystemLog;
use crate::models::logs::SystemLogFilter;

/// Log endpoints.
#[derive(Clone, Copy)]
pub struct LogApi<'a> {
    /// Request wrapper.
    client: &'a ConsoleClient,
}

impl<'a> LogApi<'a> {
    /// Borrows the client.
    #[must_use]
    pub const fn new(client: &'a ConsoleClient) -> Self {
        Self {
            client,
        }
    }

    /// `POST /log/audit/page`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a zero page or size, or the
    /// call failure.
    pub async fn audit_page(
        &self,
        page: PageQuery,
        filter: &AuditLogFilter,
    ) -> Result<PageResult<AuditLog>, ClientError> {
        self.page(LogKind::Audit, page, filter).await
    }

    /// `POST /log/system/page`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a zero page or size, or the
    /// call failure.
    pub async fn system_page(
        &self,
        page: PageQuery,
        filter: &SystemLogFilter,
    ) -> Result<PageResult<SystemLog>, ClientError> {
        self.page(LogKind::System, page, filter).await
    }

    /// `POST /log/login/page`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a zero page or size, or the
    /// call failure.
    pub async fn login_page(
        &self,
        page: PageQuery,
        filter: &LoginLogFilter,
    ) -> Result<PageResult<LoginLog>, ClientError> {
        self.page(LogKind::Login, page, filter).await
    }

    /// `POST /log/audit`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn audit_list(&self, filter: &AuditLogFilter) -> Result<Vec<AuditLog>, ClientError> {
        self.client.post("/log/audit", filter).await
    }

    /// `POST /log/system`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn system_list(&self, filter: &SystemLogFilter) -> Result<Vec<SystemLog>, ClientError> {
        self.client.post("/log/system", filter).await
    }

    /// `POST /log/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn login_list(&self, filter: &LoginLogFilter) -> Result<Vec<LoginLog>, ClientError> {
        self.client.post("/log/login", filter).await
    }

    /// `GET /log/statistics?days=N`; the server default applies when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn statistics(&self, days: Option<u32>) -> Result<LogStatistics, ClientError> {
        let query = days.map(|days| vec![("days".to_string(), days.to_string())]).unwrap_or_default();
        self.client.get("/log/statistics", query).await
    }

    /// `DELETE /log/clean?retentionDays=N`; returns removed counts per kind.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn clean_expired(
        &self,
        retention_days: u32,
    ) -> Result<BTreeMap<String, u64>, ClientError> {
        let query = vec![("retentionDays".to_string(), retention_days.to_string())];
        self.client.delete("/log/clean", query).await
    }

    /// `DELETE /log/audit/clean/{days}`; returns the removed count.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn clean_audit(&self, days: u32) -> Result<u64, ClientError> {
        self.client.delete(&format!("/log/audit/clean/{days}"), Vec::new()).await
    }

    /// `DELETE /log/clean/{days}`; returns the removed count.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the call fails.
    pub async fn clean_all(&self, days: u32) -> Result<u64, ClientError> {
        self.client.delete(&format!("/log/clean/{days}"), Vec::new()).await
    }

    /// `GET /log/{kind}/export?<filter>` saved into `target_dir`.
    ///
    /// The file name defaults to the kind's spreadsheet name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the filter cannot be encoded, the call
    /// fails, or the file cannot be written.
    pub async fn export<F: Serialize + ?Sized>(
        &self,
        kind: LogKind,
        filter: &F,
        target_dir: &Path,
        file_name: Option<&str>,
    ) -> Result<PathBuf, ClientError> {
        let query = query_pairs(filter)?;
        let path = format!("/log/{}/export", kind.segment());
        let file_name = file_name.unwrap_or(kind.export_file_name());
        self.client.download(&path, query, target_dir, Some(file_name)).await
    }

    /// Sends a validated paged query for `kind`.
    async fn page<F: Serialize, R: DeserializeOwned>(
        &self,
        kind: LogKind,
        page: PageQuery,
        filter: &F,
    ) -> Result<PageResult<R>, ClientError> {
        page.validate()?;
        let body = Paged::new(page, filter);
        self.client.post(&format!("/log/{}/page", kind.segment()), &body).await
    }
}
