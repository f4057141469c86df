// crates/biou-console-client/src/dashboard.rs
// ============================================================================
// Module: Dashboard Summary
// Description: Aggregate log counts and an optional monitor snapshot.
// Purpose: Turn the statistics map into per-kind totals for display.
// Dependencies: biou-console-util, serde, time
// ============================================================================

//! ## Overview
//! The statistics endpoint returns a map of log kind to named counters. For
//! each kind the summary uses the `total` counter when present and the sum of
//! all counters otherwise. The `today` figure is the counter keyed by the
//! current UTC date (`YYYY-MM-DD`), or zero. Kinds are looked up under the
//! backend keys (`auditLog`) and the short keys (`audit`).
//!
//! Monitor data is best effort: a failed monitor call leaves it unset.

use std::collections::BTreeMap;

use biou_console_util::DATE_PATTERN;
use biou_console_util::format_offset_date_time;
use serde::Serialize;
use time::OffsetDateTime;

use crate::client::ConsoleClient;
use crate::error::ClientError;
use crate::models::logs::LogKind;
use crate::models::logs::LogStatistics;
use crate::models::system::MonitorData;

/// Days covered when none are requested.
pub const DEFAULT_DASHBOARD_DAYS: u32 = 7;

/// Counter name carrying a precomputed total.
const TOTAL_COUNTER: &str = "total";

/// Counts for one log kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    /// Records in the window.
    pub total: u64,
    /// Records dated today.
    pub today: u64,
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Window length in days.
    pub days: u32,
    /// Audit log counts.
    pub audit: KindSummary,
    /// System log counts.
    pub system: KindSummary,
    /// Login log counts.
    pub login: KindSummary,
    /// Monitor snapshot when available.
    pub monitor: Option<MonitorData>,
}

impl DashboardSummary {
    /// Returns the counts for `kind`.
    #[must_use]
    pub const fn kind(&self, kind: LogKind) -> KindSummary {
        match kind {
            LogKind::Audit => self.audit,
            LogKind::System => self.system,
            LogKind::Login => self.login,
        }
    }

    /// Returns the total across all kinds.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        LogKind::ALL.iter().map(|kind| self.kind(*kind).total).fold(0, u64::saturating_add)
    }
}

/// Summarizes one kind from the statistics map.
#[must_use]
pub fn summarize_kind(stats: &LogStatistics, kind: LogKind, today: &str) -> KindSummary {
    let Some(counters) = counters_for(stats, kind) else {
        return KindSummary::default();
    };
    let total = counters.get(TOTAL_COUNTER).copied().unwrap_or_else(|| {
        counters.values().copied().fold(0, u64::saturating_add)
    });
    KindSummary {
        total,
        today: counters.get(today).copied().unwrap_or(0),
    }
}

/// Summarizes every kind.
#[must_use]
pub fn summarize(
    stats: &LogStatistics,
    days: u32,
    today: &str,
    monitor: Option<MonitorData>,
) -> DashboardSummary {
    DashboardSummary {
        days,
        audit: summarize_kind(stats, LogKind::Audit, today),
        system: summarize_kind(stats, LogKind::System, today),
        login: summarize_kind(stats, LogKind::Login, today),
        monitor,
    }
}

/// Returns the date key for `now`.
#[must_use]
pub fn date_key(now: OffsetDateTime) -> String {
    format_offset_date_time(now, DATE_PATTERN)
}

/// Fetches statistics and monitor data for the current UTC date.
///
/// # Errors
///
/// Returns [`ClientError`] when the statistics call fails.
pub async fn fetch(client: &ConsoleClient, days: Option<u32>) -> Result<DashboardSummary, ClientError> {
    fetch_at(client, days, OffsetDateTime::now_utc()).await
}

/// Fetches statistics and monitor data, keying `today` by `now`.
///
/// # Errors
///
/// Returns [`ClientError`] when the statistics call fails.
pub async fn fetch_at(
    client: &ConsoleClient,
    days: Option<u32>,
    now: OffsetDateTime,
) -> Result<DashboardSummary, ClientError> {
    let days = days.unwrap_or(DEFAULT_DASHBOARD_DAYS);
    let stats = client.logs().statistics(Some(days)).await?;
    let monitor = client.system().monitor().await.ok();
    Ok(summarize(&stats, days, &date_key(now), monitor))
}

/// Finds the counters for `kind` under either key spelling.
fn counters_for(stats: &LogStatistics, kind: LogKind) -> Option<&BTreeMap<String, u64>> {
    stats.get(kind.statistics_key()).or_else(|| stats.get(kind.segment()))
}
