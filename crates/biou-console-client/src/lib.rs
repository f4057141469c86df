// crates/biou-console-client/src/lib.rs
// ============================================================================
// Module: Biou Console Client
// Description: HTTP request wrapper and typed API for the admin log service.
// Purpose: Attach credentials, classify failures, and decode envelopes.
// Dependencies: async-trait, reqwest, serde, tempfile, thiserror, tokio
// ============================================================================

//! ## Overview
//! `biou-console-client` wraps every backend call in one middleware chain:
//! the stored bearer token and a cache-busting stamp go out with each
//! request, and every response is classified by HTTP status and then by the
//! envelope's business code. Failures raise a localized [`notice::Notice`];
//! an unauthorized answer clears the stored credentials and navigates to
//! the login route.
//!
//! The [`session::Session`] context, the notice sink, the navigator, and
//! the transport are all injected when the [`ConsoleClient`] is built.
//!
//! Security posture: tokens are never logged, response bodies are read
//! under a size cap, and downloads are written atomically.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod client;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod log;
pub mod middleware;
pub mod models;
pub mod notice;
pub mod session;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ConsoleClient;
pub use client::ConsoleClientBuilder;
pub use client::DEFAULT_DOWNLOAD_NAME;
pub use client::RequestOptions;
pub use client::query_pairs;
pub use client::sanitize_file_name;
pub use dashboard::DashboardSummary;
pub use dashboard::KindSummary;
pub use envelope::BusinessCode;
pub use envelope::DEFAULT_PAGE_SIZE;
pub use envelope::PageQuery;
pub use envelope::PageResult;
pub use envelope::ResponseEnvelope;
pub use envelope::SUCCESS_CODE;
pub use error::ClientError;
pub use i18n::Locale;
pub use middleware::Clock;
pub use middleware::IncomingResponse;
pub use middleware::OutgoingRequest;
pub use middleware::RequestHook;
pub use middleware::ResponseHook;
pub use middleware::ResponseKind;
pub use middleware::UploadFile;
pub use notice::LOGIN_ROUTE;
pub use notice::Navigator;
pub use notice::Notice;
pub use notice::NoticeLevel;
pub use notice::NoticeSink;
pub use session::FileStorage;
pub use session::KeyValueStorage;
pub use session::MemoryStorage;
pub use session::Session;
pub use session::StorageKey;
pub use session::Theme;
pub use transport::ReqwestTransport;
pub use transport::Transport;
