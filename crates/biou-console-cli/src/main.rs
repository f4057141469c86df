// crates/biou-console-cli/src/main.rs
// ============================================================================
// Module: Biou Console CLI Entry Point
// Description: Command dispatcher for the Biou admin log console.
// Purpose: Provide a localized command-line surface over the console client.
// Dependencies: biou-console-client, biou-console-config, clap, thiserror, tokio
// ============================================================================

//! ## Overview
//! `biou-console` signs in against the Biou log service, lists and exports
//! audit, system, and login logs, and shows the dashboard and backend status.
//! All user-facing strings go through the shared i18n catalog.
//!
//! Request failures are reported once: the client's notice sink writes them
//! to stderr, so the dispatcher only sets the exit code for those.
//! Security posture: credentials typed on the command line are validated
//! before sending; prefer `--password-stdin` over `--password`.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use biou_console_client::ClientError;
use biou_console_client::ConsoleClient;
use biou_console_client::DEFAULT_PAGE_SIZE;
use biou_console_client::FileStorage;
use biou_console_client::LOGIN_ROUTE;
use biou_console_client::Locale;
use biou_console_client::Navigator;
use biou_console_client::PageQuery;
use biou_console_client::PageResult;
use biou_console_client::Session;
use biou_console_client::Theme;
use biou_console_client::dashboard;
use biou_console_client::dashboard::DashboardSummary;
use biou_console_client::i18n::set_locale;
use biou_console_client::log::FileRequestLogSink;
use biou_console_client::log::NoopRequestLogSink;
use biou_console_client::log::RequestLogSink;
use biou_console_client::log::StderrRequestLogSink;
use biou_console_client::models::AuditLog;
use biou_console_client::models::AuditLogFilter;
use biou_console_client::models::ChangePasswordRequest;
use biou_console_client::models::LogKind;
use biou_console_client::models::LoginLog;
use biou_console_client::models::LoginLogFilter;
use biou_console_client::models::LoginRequest;
use biou_console_client::models::MonitorData;
use biou_console_client::models::SystemLog;
use biou_console_client::models::SystemLogFilter;
use biou_console_client::models::UserInfo;
use biou_console_client::notice::StderrNoticeSink;
use biou_console_client::session::StorageError;
use biou_console_client::t;
use biou_console_config::ConsoleConfig;
use biou_console_config::LogSinkKind;
use biou_console_config::LoggingConfig;
use biou_console_config::SessionConfig;
use biou_console_config::SessionStorageKind;
use biou_console_util::EMPTY_PLACEHOLDER;
use biou_console_util::Field;
use biou_console_util::format_date_time;
use biou_console_util::format_number;
use biou_console_util::mask;
use biou_console_util::time_range;
use biou_console_util::validate;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "BIOU_CONSOLE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "biou-console", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `BIOU_CONSOLE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Configuration file (overrides `BIOU_CONSOLE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session token.
    Login(LoginCommand),
    /// Sign out and clear the stored credentials.
    Logout,
    /// Replace the stored token with a fresh one.
    Refresh,
    /// Change the password; reads the current and new password from stdin.
    Passwd,
    /// Show the signed-in user.
    Whoami(WhoamiCommand),
    /// Show log totals and a monitor snapshot.
    Dashboard(DashboardCommand),
    /// List log records one page at a time.
    Logs {
        /// Log kind to list.
        #[command(subcommand)]
        command: LogsCommand,
    },
    /// Download log records as a spreadsheet.
    Export {
        /// Log kind to export.
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Remove old log records.
    Clean(CleanCommand),
    /// Backend information and health.
    System {
        /// Selected system subcommand.
        #[command(subcommand)]
        command: SystemCommand,
    },
    /// Show or change stored display preferences.
    Prefs(PrefsCommand),
}

/// Arguments for `login`.
#[derive(Args, Debug)]
struct LoginCommand {
    /// Account name.
    #[arg(long, value_name = "NAME")]
    username: String,
    /// Password (visible in the process list; prefer `--password-stdin`).
    #[arg(long, value_name = "PASSWORD", conflicts_with = "password_stdin")]
    password: Option<String>,
    /// Read the password from the first line of stdin.
    #[arg(long, action = ArgAction::SetTrue)]
    password_stdin: bool,
}

/// Arguments for `whoami`.
#[derive(Args, Debug)]
struct WhoamiCommand {
    /// Print the stored profile without calling the server.
    #[arg(long, action = ArgAction::SetTrue)]
    cached: bool,
}

/// Arguments for `dashboard`.
#[derive(Args, Debug)]
struct DashboardCommand {
    /// Statistics window in days.
    #[arg(long, value_name = "DAYS")]
    days: Option<u32>,
}

/// Paging flags.
#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Records per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    size: u32,
}

impl From<PageArgs> for PageQuery {
    fn from(args: PageArgs) -> Self {
        Self::new(args.page, args.size)
    }
}

/// Time window flags shared by every log filter.
#[derive(Args, Debug, Clone, Default)]
struct WindowArgs {
    /// Earliest record time (`YYYY-MM-DD HH:mm:ss`).
    #[arg(long, value_name = "TIME")]
    start: Option<String>,
    /// Latest record time (`YYYY-MM-DD HH:mm:ss`).
    #[arg(long, value_name = "TIME")]
    end: Option<String>,
    /// Last N days; ignored when `--start` or `--end` is given.
    #[arg(long, value_name = "DAYS")]
    days: Option<u32>,
}

impl WindowArgs {
    /// Returns the `(start, end)` bounds relative to `now`.
    fn resolve(&self, now: OffsetDateTime) -> (Option<String>, Option<String>) {
        match self.days {
            Some(days) if self.start.is_none() && self.end.is_none() => {
                let (start, end) = time_range(days, now);
                (Some(start), Some(end))
            }
            _ => (self.start.clone(), self.end.clone()),
        }
    }
}

/// Audit log filter flags.
#[derive(Args, Debug, Clone, Default)]
struct AuditFilterArgs {
    /// Operator account name.
    #[arg(long)]
    username: Option<String>,
    /// Business module.
    #[arg(long)]
    module: Option<String>,
    /// Operation type.
    #[arg(long)]
    operation_type: Option<String>,
    /// Business type.
    #[arg(long)]
    business_type: Option<String>,
    /// 1 success, 0 failure.
    #[arg(long)]
    status: Option<i32>,
    /// Client IP address.
    #[arg(long)]
    ip: Option<String>,
    /// Time window.
    #[command(flatten)]
    window: WindowArgs,
}

impl AuditFilterArgs {
    /// Builds the request filter.
    fn to_filter(&self, now: OffsetDateTime) -> AuditLogFilter {
        let (start_time, end_time) = self.window.resolve(now);
        AuditLogFilter {
            user_id: None,
            username: self.username.clone(),
            operation_type: self.operation_type.clone(),
            business_type: self.business_type.clone(),
            module: self.module.clone(),
            start_time,
            end_time,
            status: self.status,
            ip_address: self.ip.clone(),
        }
    }
}

/// System log filter flags.
#[derive(Args, Debug, Clone, Default)]
struct SystemFilterArgs {
    /// Log level (for example `ERROR`).
    #[arg(long)]
    level: Option<String>,
    /// Logger name.
    #[arg(long)]
    logger: Option<String>,
    /// Message text.
    #[arg(long)]
    message: Option<String>,
    /// Thread name.
    #[arg(long)]
    thread: Option<String>,
    /// Time window.
    #[command(flatten)]
    window: WindowArgs,
}

impl SystemFilterArgs {
    /// Builds the request filter.
    fn to_filter(&self, now: OffsetDateTime) -> SystemLogFilter {
        let (start_time, end_time) = self.window.resolve(now);
        SystemLogFilter {
            level: self.level.clone(),
            logger: self.logger.clone(),
            message: self.message.clone(),
            start_time,
            end_time,
            thread: self.thread.clone(),
            class_name: None,
            method_name: None,
        }
    }
}

/// Login log filter flags.
#[derive(Args, Debug, Clone, Default)]
struct LoginFilterArgs {
    /// Account name.
    #[arg(long)]
    username: Option<String>,
    /// Login type.
    #[arg(long)]
    login_type: Option<String>,
    /// 1 success, 0 failure.
    #[arg(long)]
    status: Option<i32>,
    /// Client IP address.
    #[arg(long)]
    ip: Option<String>,
    /// Resolved location.
    #[arg(long)]
    location: Option<String>,
    /// Time window.
    #[command(flatten)]
    window: WindowArgs,
}

impl LoginFilterArgs {
    /// Builds the request filter.
    fn to_filter(&self, now: OffsetDateTime) -> LoginLogFilter {
        let (start_time, end_time) = self.window.resolve(now);
        LoginLogFilter {
            username: self.username.clone(),
            login_type: self.login_type.clone(),
            start_time,
            end_time,
            status: self.status,
            ip_address: self.ip.clone(),
            user_agent: None,
            location: self.location.clone(),
        }
    }
}

/// `logs` subcommands.
#[derive(Subcommand, Debug)]
enum LogsCommand {
    /// Audit logs.
    Audit {
        /// Paging flags.
        #[command(flatten)]
        page: PageArgs,
        /// Filter flags.
        #[command(flatten)]
        filter: AuditFilterArgs,
    },
    /// System logs.
    System {
        /// Paging flags.
        #[command(flatten)]
        page: PageArgs,
        /// Filter flags.
        #[command(flatten)]
        filter: SystemFilterArgs,
    },
    /// Login logs.
    Login {
        /// Paging flags.
        #[command(flatten)]
        page: PageArgs,
        /// Filter flags.
        #[command(flatten)]
        filter: LoginFilterArgs,
    },
}

/// Download destination flags.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Directory the spreadsheet is saved into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,
    /// File name; defaults to the kind's export name.
    #[arg(long, value_name = "NAME")]
    file_name: Option<String>,
}

/// `export` subcommands.
#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Audit logs.
    Audit {
        /// Filter flags.
        #[command(flatten)]
        filter: AuditFilterArgs,
        /// Destination flags.
        #[command(flatten)]
        output: OutputArgs,
    },
    /// System logs.
    System {
        /// Filter flags.
        #[command(flatten)]
        filter: SystemFilterArgs,
        /// Destination flags.
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Login logs.
    Login {
        /// Filter flags.
        #[command(flatten)]
        filter: LoginFilterArgs,
        /// Destination flags.
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments for `clean`.
#[derive(Args, Debug)]
struct CleanCommand {
    /// Which records to remove.
    #[arg(long, value_enum, default_value = "expired")]
    scope: CleanScope,
    /// Retention window in days; older records are removed.
    #[arg(long, value_name = "DAYS")]
    days: u32,
}

/// Cleanup scopes.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum CleanScope {
    /// Every kind, reporting counts per kind.
    Expired,
    /// Audit logs only.
    Audit,
    /// Every kind, reporting one total.
    All,
}

/// `system` subcommands.
#[derive(Subcommand, Debug)]
enum SystemCommand {
    /// Application and host information.
    Info,
    /// Component health.
    Health,
    /// Resource usage snapshot.
    Monitor,
}

/// Arguments for `prefs`.
#[derive(Args, Debug, Default)]
struct PrefsCommand {
    /// Display theme.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
    /// Preferred language (`en` or `zh-CN`).
    #[arg(long, value_name = "LANG")]
    language: Option<String>,
    /// Whether the sidebar starts collapsed.
    #[arg(long, value_name = "BOOL")]
    sidebar_collapsed: Option<bool>,
}

/// Supported theme selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ThemeArg {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Simplified Chinese.
    #[value(name = "zh-CN", alias = "zh")]
    ZhCn,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::ZhCn => Self::ZhCn,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// True when a notice already showed the message.
    reported: bool,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
            reported: false,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        Self {
            reported: error.raises_notice(),
            message: error.to_string(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Maps a session storage failure to a localized error.
fn session_error(error: StorageError) -> CliError {
    CliError::new(t!("session.failed", error = error))
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) if err.reported => ExitCode::FAILURE,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = ConsoleConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let session = open_session(&config.session)?;
    let env_lang = std::env::var(LANG_ENV).ok();
    let stored_lang = session.language().map_err(session_error)?;
    let locale = resolve_locale(
        cli.lang,
        env_lang.as_deref(),
        stored_lang.as_deref(),
        config.ui.locale.as_deref(),
    )?;
    set_locale(locale);

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };
    let client = build_client(&config, session, locale)?;

    match command {
        Commands::Login(command) => command_login(&client, command).await,
        Commands::Logout => command_logout(&client).await,
        Commands::Refresh => command_refresh(&client).await,
        Commands::Passwd => command_passwd(&client).await,
        Commands::Whoami(command) => command_whoami(&client, &command).await,
        Commands::Dashboard(command) => command_dashboard(&client, &command).await,
        Commands::Logs {
            command,
        } => command_logs(&client, command).await,
        Commands::Export {
            command,
        } => command_export(&client, command).await,
        Commands::Clean(command) => command_clean(&client, &command).await,
        Commands::System {
            command,
        } => command_system(&client, &command).await,
        Commands::Prefs(command) => command_prefs(client.session(), &command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Wiring
// ============================================================================

/// Resolves the locale: flag, then environment, then the stored preference,
/// then the config file.
fn resolve_locale(
    lang: Option<LangArg>,
    env_lang: Option<&str>,
    stored_lang: Option<&str>,
    config_lang: Option<&str>,
) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    if let Some(locale) = stored_lang.and_then(Locale::parse) {
        return Ok(locale);
    }
    if let Some(value) = config_lang {
        return Locale::parse(value)
            .ok_or_else(|| CliError::new(t!("i18n.lang.invalid_config", value = value)));
    }
    Ok(Locale::En)
}

/// Opens the session store selected by the config.
fn open_session(config: &SessionConfig) -> CliResult<Session> {
    if config.storage == SessionStorageKind::Memory {
        return Ok(Session::in_memory());
    }
    let path = config.file_path().ok_or_else(|| CliError::new(t!("session.path_missing")))?;
    Ok(Session::new(Arc::new(FileStorage::new(path))))
}

/// Opens the request log sink selected by the config.
fn open_log_sink(config: &LoggingConfig) -> CliResult<Arc<dyn RequestLogSink>> {
    match config.sink {
        LogSinkKind::None => Ok(Arc::new(NoopRequestLogSink)),
        LogSinkKind::Stderr => Ok(Arc::new(StderrRequestLogSink)),
        LogSinkKind::File => {
            let path = PathBuf::from(config.path.as_deref().unwrap_or_default().trim());
            let sink = FileRequestLogSink::new(&path).map_err(|err| {
                CliError::new(t!("logging.open_failed", path = path.display(), error = err))
            })?;
            Ok(Arc::new(sink))
        }
    }
}

/// Builds the API client with stderr notices and a sign-in hint navigator.
fn build_client(config: &ConsoleConfig, session: Session, locale: Locale) -> CliResult<ConsoleClient> {
    let log_sink = open_log_sink(&config.logging)?;
    ConsoleClient::builder(config.api.clone())
        .session(session)
        .notices(Arc::new(StderrNoticeSink::new(locale)))
        .navigator(Arc::new(HintNavigator))
        .log_sink(log_sink)
        .locale(locale)
        .build()
        .map_err(|err| CliError::new(t!("client.build_failed", error = err)))
}

/// Prints where to go next instead of switching screens.
struct HintNavigator;

impl Navigator for HintNavigator {
    fn navigate(&self, route: &str) {
        let _ = write_stderr_line(&navigation_hint(route));
    }
}

/// Returns the hint printed for `route`.
fn navigation_hint(route: &str) -> String {
    if route == LOGIN_ROUTE {
        t!("navigate.login")
    } else {
        t!("navigate.other", route = route)
    }
}

// ============================================================================
// SECTION: Auth Commands
// ============================================================================

/// Executes `login`.
async fn command_login(client: &ConsoleClient, command: LoginCommand) -> CliResult<ExitCode> {
    let password = match (command.password, command.password_stdin) {
        (Some(password), _) => password,
        (None, true) => {
            read_stdin_line()?.ok_or_else(|| CliError::new(t!("login.password_missing")))?
        }
        (None, false) => return Err(CliError::new(t!("login.password_missing"))),
    };
    validate_credentials(&command.username, &password)?;
    let response = client.auth().login(&LoginRequest::new(command.username, password)).await?;
    write_lines(&[t!("login.success", username = response.user_info.username)])?;
    Ok(ExitCode::SUCCESS)
}

/// Checks the username and password shapes before sending.
fn validate_credentials(username: &str, password: &str) -> CliResult<()> {
    validate(Field::Username, username)
        .map_err(|_| CliError::new(t!("login.invalid_username")))?;
    validate(Field::Password, password)
        .map_err(|_| CliError::new(t!("login.invalid_password")))?;
    Ok(())
}

/// Executes `logout`.
async fn command_logout(client: &ConsoleClient) -> CliResult<ExitCode> {
    client.auth().logout().await?;
    write_lines(&[t!("logout.success")])?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `refresh`.
async fn command_refresh(client: &ConsoleClient) -> CliResult<ExitCode> {
    client.auth().refresh_token().await?;
    write_lines(&[t!("refresh.success")])?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `passwd`.
async fn command_passwd(client: &ConsoleClient) -> CliResult<ExitCode> {
    let (Some(old_password), Some(new_password)) = (read_stdin_line()?, read_stdin_line()?) else {
        return Err(CliError::new(t!("password.missing")));
    };
    validate(Field::Password, &new_password)
        .map_err(|_| CliError::new(t!("login.invalid_password")))?;
    let request = ChangePasswordRequest {
        old_password,
        new_password,
    };
    client.auth().change_password(&request).await?;
    write_lines(&[t!("password.changed")])?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `whoami`.
async fn command_whoami(client: &ConsoleClient, command: &WhoamiCommand) -> CliResult<ExitCode> {
    let session = client.session();
    let user = if command.cached {
        session.user_info().map_err(session_error)?
    } else if session.is_authenticated().map_err(session_error)? {
        let user = client.auth().current_user().await?;
        session.store_user_info(&user).map_err(session_error)?;
        Some(user)
    } else {
        None
    };
    let lines = user.as_ref().map_or_else(|| vec![t!("whoami.anonymous")], user_lines);
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

/// Renders a user profile with masked contact details.
fn user_lines(user: &UserInfo) -> Vec<String> {
    let mut lines = vec![t!("whoami.user", username = user.username, id = user.id)];
    if let Some(email) = non_empty(user.email.as_deref()) {
        lines.push(t!("whoami.email", email = mask::email(email)));
    }
    if let Some(phone) = non_empty(user.phone.as_deref()) {
        lines.push(t!("whoami.phone", phone = mask::phone(phone)));
    }
    if !user.roles.is_empty() {
        lines.push(t!("whoami.roles", roles = user.roles.join(", ")));
    }
    lines
}

// ============================================================================
// SECTION: Dashboard and System Commands
// ============================================================================

/// Executes `dashboard`.
async fn command_dashboard(client: &ConsoleClient, command: &DashboardCommand) -> CliResult<ExitCode> {
    let summary = dashboard::fetch(client, command.days).await?;
    write_lines(&dashboard_lines(&summary))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders the dashboard summary.
fn dashboard_lines(summary: &DashboardSummary) -> Vec<String> {
    let mut lines = vec![t!("dashboard.header", days = summary.days)];
    for kind in LogKind::ALL {
        let counts = summary.kind(kind);
        lines.push(t!(
            "dashboard.row",
            kind = kind_label(kind),
            total = counts.total,
            today = counts.today
        ));
    }
    lines.push(t!("dashboard.grand_total", total = summary.grand_total()));
    match &summary.monitor {
        Some(monitor) => lines.extend(monitor_lines(monitor)),
        None => lines.push(t!("dashboard.monitor_unavailable")),
    }
    lines
}

/// Renders a monitor snapshot.
fn monitor_lines(monitor: &MonitorData) -> Vec<String> {
    vec![
        t!(
            "monitor.usage",
            cpu = percent(monitor.cpu.usage),
            memory = percent(monitor.memory.usage),
            disk = percent(monitor.disk.usage)
        ),
        t!(
            "monitor.network",
            received = format_number(monitor.network.received, 1),
            sent = format_number(monitor.network.sent, 1)
        ),
    ]
}

/// Executes `system`.
async fn command_system(client: &ConsoleClient, command: &SystemCommand) -> CliResult<ExitCode> {
    let lines = match command {
        SystemCommand::Info => {
            let info = client.system().info().await?;
            vec![
                t!(
                    "system.info",
                    name = info.name,
                    version = info.version,
                    os = info.os_name,
                    os_version = info.os_version,
                    cpus = info.cpu_count
                ),
                t!(
                    "system.memory",
                    used = info.used_memory,
                    total = info.total_memory,
                    free = info.free_memory
                ),
            ]
        }
        SystemCommand::Health => {
            let health = client.system().health().await?;
            vec![t!(
                "system.health",
                status = health.status,
                database = health.database,
                redis = health.redis,
                disk = health.disk_space,
                uptime = health.uptime
            )]
        }
        SystemCommand::Monitor => monitor_lines(&client.system().monitor().await?),
    };
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Log Commands
// ============================================================================

/// Executes `logs`.
async fn command_logs(client: &ConsoleClient, command: LogsCommand) -> CliResult<ExitCode> {
    let now = OffsetDateTime::now_utc();
    let logs = client.logs();
    let lines = match command {
        LogsCommand::Audit {
            page,
            filter,
        } => page_lines(&logs.audit_page(page.into(), &filter.to_filter(now)).await?, audit_row),
        LogsCommand::System {
            page,
            filter,
        } => page_lines(&logs.system_page(page.into(), &filter.to_filter(now)).await?, system_row),
        LogsCommand::Login {
            page,
            filter,
        } => page_lines(&logs.login_page(page.into(), &filter.to_filter(now)).await?, login_row),
    };
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `export`.
async fn command_export(client: &ConsoleClient, command: ExportCommand) -> CliResult<ExitCode> {
    let now = OffsetDateTime::now_utc();
    let logs = client.logs();
    let path = match command {
        ExportCommand::Audit {
            filter,
            output,
        } => {
            logs.export(
                LogKind::Audit,
                &filter.to_filter(now),
                &output.output_dir,
                output.file_name.as_deref(),
            )
            .await?
        }
        ExportCommand::System {
            filter,
            output,
        } => {
            logs.export(
                LogKind::System,
                &filter.to_filter(now),
                &output.output_dir,
                output.file_name.as_deref(),
            )
            .await?
        }
        ExportCommand::Login {
            filter,
            output,
        } => {
            logs.export(
                LogKind::Login,
                &filter.to_filter(now),
                &output.output_dir,
                output.file_name.as_deref(),
            )
            .await?
        }
    };
    write_lines(&[t!("export.saved", path = path.display())])?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `clean`.
async fn command_clean(client: &ConsoleClient, command: &CleanCommand) -> CliResult<ExitCode> {
    let logs = client.logs();
    let lines = match command.scope {
        CleanScope::Expired => {
            let removed = logs.clean_expired(command.days).await?;
            let mut lines = vec![t!("clean.expired_header")];
            lines.extend(removed.iter().map(|(key, count)| {
                t!("clean.expired_row", kind = statistics_label(key), count = count)
            }));
            lines
        }
        CleanScope::Audit => {
            let count = logs.clean_audit(command.days).await?;
            vec![t!("clean.count", count = count)]
        }
        CleanScope::All => {
            let count = logs.clean_all(command.days).await?;
            vec![t!("clean.count", count = count)]
        }
    };
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Preferences
// ============================================================================

/// Executes `prefs`: applies any given flags, then prints every preference.
fn command_prefs(session: &Session, command: &PrefsCommand) -> CliResult<ExitCode> {
    apply_prefs(session, command)?;
    write_lines(&prefs_lines(session)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Stores the preferences named on the command line.
fn apply_prefs(session: &Session, command: &PrefsCommand) -> CliResult<()> {
    if let Some(language) = command.language.as_deref() {
        let locale = Locale::parse(language)
            .ok_or_else(|| CliError::new(t!("prefs.invalid_language", value = language)))?;
        session.set_language(locale.as_str()).map_err(session_error)?;
    }
    if let Some(theme) = command.theme {
        session.set_theme(theme.into()).map_err(session_error)?;
    }
    if let Some(collapsed) = command.sidebar_collapsed {
        session.set_sidebar_collapsed(collapsed).map_err(session_error)?;
    }
    Ok(())
}

/// Renders the stored preferences.
fn prefs_lines(session: &Session) -> CliResult<Vec<String>> {
    let theme = match session.theme().map_err(session_error)? {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    let language = session.language().map_err(session_error)?.unwrap_or_else(|| t!("prefs.unset"));
    let collapsed = session.sidebar_collapsed().map_err(session_error)?;
    Ok(vec![
        t!("prefs.theme", value = theme),
        t!("prefs.language", value = language),
        t!("prefs.sidebar", value = collapsed),
    ])
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one page: a header line, then one line per record.
fn page_lines<T>(page: &PageResult<T>, render: fn(&T) -> String) -> Vec<String> {
    let mut lines =
        vec![t!("logs.page", current = page.current, pages = page.pages, total = page.total)];
    if page.records.is_empty() {
        lines.push(t!("logs.empty"));
    } else {
        lines.extend(page.records.iter().map(render));
    }
    lines
}

/// Renders an audit record.
fn audit_row(log: &AuditLog) -> String {
    t!(
        "logs.row.audit",
        time = format_date_time(log.create_time.as_deref(), None),
        username = or_placeholder(log.username.as_deref()),
        operation = or_placeholder(log.operation_type.as_deref()),
        module = or_placeholder(log.module.as_deref()),
        status = status_label(log.status),
        ip = masked_ip(log.ip_address.as_deref()),
        duration = log.execution_time
    )
}

/// Renders a system record.
fn system_row(log: &SystemLog) -> String {
    t!(
        "logs.row.system",
        time = format_date_time(log.create_time.as_deref(), None),
        level = or_placeholder(log.level.as_deref()),
        logger = or_placeholder(log.logger.as_deref()),
        message = or_placeholder(log.message.as_deref())
    )
}

/// Renders a login record.
fn login_row(log: &LoginLog) -> String {
    t!(
        "logs.row.login",
        time = format_date_time(log.login_time.as_deref(), None),
        username = or_placeholder(log.username.as_deref()),
        login_type = or_placeholder(log.login_type.as_deref()),
        status = status_label(log.status),
        ip = masked_ip(log.ip_address.as_deref()),
        location = or_placeholder(log.location.as_deref())
    )
}

/// Localized label for a log kind.
fn kind_label(kind: LogKind) -> String {
    match kind {
        LogKind::Audit => t!("dashboard.kind.audit"),
        LogKind::System => t!("dashboard.kind.system"),
        LogKind::Login => t!("dashboard.kind.login"),
    }
}

/// Localized label for a statistics key; unknown keys are shown as-is.
fn statistics_label(key: &str) -> String {
    LogKind::ALL
        .into_iter()
        .find(|kind| kind.statistics_key() == key || kind.segment() == key)
        .map_or_else(|| key.to_string(), kind_label)
}

/// Localized label for a 1/0 status.
fn status_label(status: i32) -> String {
    if status == 1 { t!("logs.status.success") } else { t!("logs.status.failure") }
}

/// Masks an IP address for display.
fn masked_ip(value: Option<&str>) -> String {
    non_empty(value).map_or_else(|| EMPTY_PLACEHOLDER.to_string(), mask::ip)
}

/// Returns the value, or the empty placeholder when blank.
fn or_placeholder(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or(EMPTY_PLACEHOLDER)
}

/// Filters out blank strings.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Renders a percentage with one decimal.
fn percent(value: f64) -> String {
    format!("{value:.1}")
}

// ============================================================================
// SECTION: Input and Output Helpers
// ============================================================================

/// Reads one line from stdin without its terminator; `None` at end of input.
fn read_stdin_line() -> CliResult<Option<String>> {
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| CliError::new(t!("login.password_read_failed", error = err)))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Writes each line to stdout.
fn write_lines(lines: &[String]) -> CliResult<()> {
    for line in lines {
        write_stdout_line(line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label =
        if stream == "stderr" { t!("output.stream.stderr") } else { t!("output.stream.stdout") };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
