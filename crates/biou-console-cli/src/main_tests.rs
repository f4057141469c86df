// crates/biou-console-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing, wiring, and rendering.
// Purpose: Pin flag shapes, locale precedence, and row formatting.
// Dependencies: biou-console-cli main helpers
// ============================================================================

//! ## Overview
//! Exercises the pure helpers behind each command. Nothing here touches the
//! network; sessions are in memory.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use biou_console_client::ClientError;
use biou_console_client::Locale;
use biou_console_client::PageResult;
use biou_console_client::Session;
use biou_console_client::Theme;
use biou_console_client::dashboard::DashboardSummary;
use biou_console_client::dashboard::KindSummary;
use biou_console_client::models::AuditLog;
use biou_console_client::models::LoginLog;
use biou_console_client::models::UserInfo;
use biou_console_config::SessionConfig;
use biou_console_config::SessionStorageKind;
use clap::Parser;
use time::OffsetDateTime;

use super::Cli;
use super::CliError;
use super::CleanScope;
use super::Commands;
use super::ExportCommand;
use super::LangArg;
use super::LogsCommand;
use super::PrefsCommand;
use super::ThemeArg;
use super::WindowArgs;
use super::apply_prefs;
use super::audit_row;
use super::dashboard_lines;
use super::login_row;
use super::navigation_hint;
use super::open_session;
use super::or_placeholder;
use super::page_lines;
use super::prefs_lines;
use super::resolve_locale;
use super::statistics_label;
use super::user_lines;
use super::validate_credentials;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("biou-console").chain(args.iter().copied())).unwrap()
}

fn fixed_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn logs_audit_flags_build_page_and_filter() {
    let cli = parse(&[
        "logs",
        "audit",
        "--page",
        "3",
        "--size",
        "50",
        "--operation-type",
        "DELETE",
        "--status",
        "0",
        "--ip",
        "10.0.0.1",
    ]);
    let Some(Commands::Logs {
        command: LogsCommand::Audit {
            page,
            filter,
        },
    }) = cli.command
    else {
        panic!("expected logs audit");
    };
    assert_eq!((page.page, page.size), (3, 50));
    let built = filter.to_filter(fixed_now());
    assert_eq!(built.operation_type.as_deref(), Some("DELETE"));
    assert_eq!(built.status, Some(0));
    assert_eq!(built.ip_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(built.start_time, None);
}

#[test]
fn page_defaults_apply() {
    let cli = parse(&["logs", "system"]);
    let Some(Commands::Logs {
        command: LogsCommand::System {
            page, ..
        },
    }) = cli.command
    else {
        panic!("expected logs system");
    };
    assert_eq!((page.page, page.size), (1, 20));
}

#[test]
fn export_defaults_to_current_directory() {
    let cli = parse(&["export", "login", "--username", "bob"]);
    let Some(Commands::Export {
        command: ExportCommand::Login {
            filter,
            output,
        },
    }) = cli.command
    else {
        panic!("expected export login");
    };
    assert_eq!(output.output_dir, std::path::PathBuf::from("."));
    assert_eq!(output.file_name, None);
    assert_eq!(filter.to_filter(fixed_now()).username.as_deref(), Some("bob"));
}

#[test]
fn clean_scope_defaults_to_expired_and_requires_days() {
    let cli = parse(&["clean", "--days", "30"]);
    let Some(Commands::Clean(command)) = cli.command else {
        panic!("expected clean");
    };
    assert_eq!(command.scope, CleanScope::Expired);
    assert_eq!(command.days, 30);
    assert!(Cli::try_parse_from(["biou-console", "clean"]).is_err());
}

#[test]
fn password_flags_conflict() {
    let result = Cli::try_parse_from([
        "biou-console",
        "login",
        "--username",
        "admin",
        "--password",
        "secret1",
        "--password-stdin",
    ]);
    assert!(result.is_err());
}

#[test]
fn global_flags_parse_after_the_subcommand() {
    let cli = parse(&["system", "health", "--lang", "zh", "--config", "/tmp/biou.toml"]);
    assert!(matches!(cli.lang, Some(LangArg::ZhCn)));
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/biou.toml")));
}

// ============================================================================
// SECTION: Wiring
// ============================================================================

#[test]
fn locale_precedence_is_flag_env_stored_config() {
    let resolved = |lang, env, stored, config| resolve_locale(lang, env, stored, config).unwrap();
    assert_eq!(resolved(Some(LangArg::En), Some("zh-CN"), None, None), Locale::En);
    assert_eq!(resolved(None, Some("zh_CN"), Some("en"), None), Locale::ZhCn);
    assert_eq!(resolved(None, None, Some("zh-CN"), Some("en")), Locale::ZhCn);
    assert_eq!(resolved(None, None, None, Some("zh")), Locale::ZhCn);
    assert_eq!(resolved(None, None, None, None), Locale::En);
}

#[test]
fn garbled_stored_language_falls_through() {
    assert_eq!(resolve_locale(None, None, Some("xx"), Some("zh-CN")).unwrap(), Locale::ZhCn);
}

#[test]
fn invalid_env_and_config_languages_fail() {
    let err = resolve_locale(None, Some("fr"), None, None).unwrap_err();
    assert!(err.to_string().contains("BIOU_CONSOLE_LANG"));
    assert!(resolve_locale(None, None, None, Some("fr")).is_err());
}

#[test]
fn memory_session_config_opens_in_memory_store() {
    let config = SessionConfig {
        storage: SessionStorageKind::Memory,
        path: Some("/ignored".to_string()),
    };
    let session = open_session(&config).unwrap();
    session.store_token("tok").unwrap();
    assert!(session.is_authenticated().unwrap());
}

#[test]
fn file_session_config_persists_across_opens() {
    let dir = std::env::temp_dir().join(format!("biou-console-cli-session-{}", std::process::id()));
    let path = dir.join("session.json");
    let config = SessionConfig {
        storage: SessionStorageKind::File,
        path: Some(path.display().to_string()),
    };
    open_session(&config).unwrap().store_token("tok").unwrap();
    let reopened = open_session(&config).unwrap();
    assert_eq!(reopened.token().unwrap().as_deref(), Some("tok"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn login_route_gets_the_sign_in_hint() {
    assert!(navigation_hint("/login").contains("biou-console login"));
    assert!(navigation_hint("/dashboard").contains("/dashboard"));
}

#[test]
fn client_errors_with_notices_are_not_reprinted() {
    let business: CliError = ClientError::Business {
        code: 500,
        message: "boom".to_string(),
    }
    .into();
    assert!(business.reported);
    let local: CliError = ClientError::InvalidInput("size must be at least 1".to_string()).into();
    assert!(!local.reported);
    assert!(local.to_string().contains("size must be at least 1"));
}

#[test]
fn credentials_are_checked_before_sending() {
    assert!(validate_credentials("admin_01", "secret1").is_ok());
    assert!(validate_credentials("a", "secret1").is_err());
    assert!(validate_credentials("bad name", "secret1").is_err());
    assert!(validate_credentials("admin", "12345").is_err());
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn window_days_expand_to_a_range() {
    let window = WindowArgs {
        days: Some(7),
        ..WindowArgs::default()
    };
    let (start, end) = window.resolve(fixed_now());
    assert_eq!(start.as_deref(), Some("2023-11-07 22:13:20"));
    assert_eq!(end.as_deref(), Some("2023-11-14 22:13:20"));
}

#[test]
fn explicit_window_bounds_win_over_days() {
    let window = WindowArgs {
        start: Some("2024-01-01 00:00:00".to_string()),
        end: None,
        days: Some(7),
    };
    assert_eq!(window.resolve(fixed_now()), (Some("2024-01-01 00:00:00".to_string()), None));
}

#[test]
fn audit_rows_mask_ip_and_format_time() {
    let log = AuditLog {
        username: Some("admin".to_string()),
        operation_type: Some("UPDATE".to_string()),
        module: Some("user".to_string()),
        ip_address: Some("192.168.1.100".to_string()),
        status: 1,
        execution_time: 42,
        create_time: Some("2024-01-02T03:04:05Z".to_string()),
        ..AuditLog::default()
    };
    let row = audit_row(&log);
    assert!(row.contains("2024-01-02 03:04:05"));
    assert!(row.contains("192.168.***.100"));
    assert!(row.contains("success"));
    assert!(row.contains("42ms"));
}

#[test]
fn login_rows_use_placeholders_for_missing_fields() {
    let log = LoginLog {
        status: 0,
        ..LoginLog::default()
    };
    let row = login_row(&log);
    assert!(row.starts_with('-'));
    assert!(row.contains("failure"));
    assert_eq!(or_placeholder(Some("  ")), "-");
}

#[test]
fn empty_pages_say_so() {
    let page: PageResult<AuditLog> = PageResult {
        records: Vec::new(),
        total: 0,
        size: 20,
        current: 1,
        pages: 0,
    };
    let lines = page_lines(&page, audit_row);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("0 records"));
    assert_eq!(lines[1], "No records.");
}

#[test]
fn dashboard_without_monitor_notes_it() {
    let summary = DashboardSummary {
        days: 7,
        audit: KindSummary {
            total: 5,
            today: 1,
        },
        system: KindSummary::default(),
        login: KindSummary::default(),
        monitor: None,
    };
    let lines = dashboard_lines(&summary);
    assert!(lines[0].contains('7'));
    assert!(lines[1].contains("Audit logs: 5 total, 1 today"));
    assert!(lines.iter().any(|line| line == "All logs: 5"));
    assert_eq!(lines.last().map(String::as_str), Some("Monitor data unavailable."));
}

#[test]
fn statistics_keys_get_kind_labels() {
    assert_eq!(statistics_label("auditLog"), "Audit logs");
    assert_eq!(statistics_label("login"), "Login logs");
    assert_eq!(statistics_label("operationLog"), "operationLog");
}

#[test]
fn user_lines_mask_contact_details() {
    let user = UserInfo {
        id: 7,
        username: "ops".to_string(),
        email: Some("operator@example.com".to_string()),
        phone: Some("13812345678".to_string()),
        roles: vec!["ADMIN".to_string(), "AUDITOR".to_string()],
        ..UserInfo::default()
    };
    let lines = user_lines(&user);
    assert_eq!(lines[0], "ops (id 7)");
    assert!(lines[1].contains("op***r@example.com"));
    assert!(lines[2].contains("138****5678"));
    assert_eq!(lines[3], "Roles: ADMIN, AUDITOR");
}

#[test]
fn prefs_are_stored_and_listed() {
    let session = Session::in_memory();
    let command = PrefsCommand {
        theme: Some(ThemeArg::Dark),
        language: Some("zh_cn".to_string()),
        sidebar_collapsed: Some(true),
    };
    apply_prefs(&session, &command).unwrap();
    assert_eq!(session.theme().unwrap(), Theme::Dark);
    assert_eq!(session.language().unwrap().as_deref(), Some("zh-CN"));
    let lines = prefs_lines(&session).unwrap();
    assert_eq!(lines, vec!["Theme: dark", "Language: zh-CN", "Sidebar collapsed: true"]);
}

#[test]
fn unknown_pref_language_is_rejected_without_writes() {
    let session = Session::in_memory();
    let command = PrefsCommand {
        language: Some("klingon".to_string()),
        theme: Some(ThemeArg::Dark),
        ..PrefsCommand::default()
    };
    assert!(apply_prefs(&session, &command).is_err());
    assert_eq!(session.theme().unwrap(), Theme::Light);
    assert_eq!(prefs_lines(&session).unwrap()[1], "Language: (unset)");
}
