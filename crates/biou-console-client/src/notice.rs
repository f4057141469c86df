// crates/biou-console-client/src/notice.rs
// ============================================================================
// Module: Notices and Navigation
// Description: User-visible messages and route changes raised by requests.
// Purpose: Let front ends decide how failures are shown and where users go.
// Dependencies: biou-console-client::i18n
// ============================================================================

//! ## Overview
//! The request wrapper never prints or navigates on its own. It reports
//! failures to a [`NoticeSink`] and sends the user to the login entry point
//! through a [`Navigator`]. Recording implementations back the test suites.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use crate::i18n::Locale;
use crate::i18n::translate_in;

// ============================================================================
// SECTION: Notices
// ============================================================================

/// Login entry point route.
pub const LOGIN_ROUTE: &str = "/login";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// Completed action.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failed request.
    Error,
}

impl NoticeLevel {
    /// Returns the catalog key for the level label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Info => "notice.level.info",
            Self::Success => "notice.level.success",
            Self::Warning => "notice.level.warning",
            Self::Error => "notice.level.error",
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Localized text.
    pub message: String,
}

impl Notice {
    /// Builds an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives notices raised by the request wrapper.
pub trait NoticeSink: Send + Sync {
    /// Shows `notice` to the user.
    fn notify(&self, notice: &Notice);
}

/// Writes notices to stderr as `[level] message`.
pub struct StderrNoticeSink {
    /// Locale for the level label.
    locale: Locale,
}

impl StderrNoticeSink {
    /// Creates a sink labelling levels in `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self {
            locale,
        }
    }
}

impl NoticeSink for StderrNoticeSink {
    fn notify(&self, notice: &Notice) {
        let label = translate_in(self.locale, notice.level.label_key(), Vec::new());
        let _ = writeln!(std::io::stderr(), "[{label}] {}", notice.message);
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNoticeSink {
    /// Notices in arrival order.
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNoticeSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded notices.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|notices| notices.clone()).unwrap_or_default()
    }
}

impl NoticeSink for RecordingNoticeSink {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

/// Discards notices.
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notify(&self, _notice: &Notice) {}
}

// ============================================================================
// SECTION: Navigation
// ============================================================================

/// Moves the user to another entry point.
pub trait Navigator: Send + Sync {
    /// Navigates to `route`.
    fn navigate(&self, route: &str);
}

/// Keeps every requested route in memory.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    /// Routes in arrival order.
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded routes.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().map(|routes| routes.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}

/// Ignores navigation requests.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: &str) {}
}
