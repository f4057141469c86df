// crates/biou-console-client/src/i18n.rs
// ============================================================================
// Module: Console Internationalization Helpers
// Description: Message catalog and translation utilities for the console.
// Purpose: Centralize user-facing notices and CLI output in two locales.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! User-facing strings live in a translation catalog with English and
//! Simplified Chinese entries. The request wrapper translates its notices
//! with the locale it was built with ([`translate_in`]); front ends route
//! their own output through the [`t!`](crate::t) macro, which reads the
//! process-wide locale.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported console locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Simplified Chinese.
    ZhCn,
}

impl Locale {
    /// Returns the canonical locale tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh-CN",
        }
    }

    /// Parses a locale tag (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "zh" => Some(Self::ZhCn),
            _ => None,
        }
    }
}

/// Ordered list of supported locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::ZhCn];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `status`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates.
    pub key: &'static str,
    /// The formatted value substituted for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Process-wide locale used by [`translate`].
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the process-wide locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the process-wide locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("notice.network_unreachable", "Network connection failed. Check your network settings."),
    ("notice.session_expired", "Session expired. Please sign in again."),
    ("notice.forbidden", "Insufficient privileges. Please contact an administrator."),
    ("notice.resource_not_found", "The requested resource does not exist."),
    ("notice.endpoint_not_found", "The requested endpoint does not exist."),
    ("notice.server_error", "Internal server error. Please try again later."),
    ("notice.request_failed_status", "Request failed: {status}"),
    ("notice.request_failed", "Request failed"),
    ("notice.unauthorized", "Unauthorized"),
    ("notice.level.info", "info"),
    ("notice.level.success", "ok"),
    ("notice.level.warning", "warning"),
    ("notice.level.error", "error"),
    ("main.version", "biou-console {version}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'zh-CN'."),
    ("i18n.lang.invalid_config", "Unsupported ui.locale in config: {value}."),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load configuration: {error}"),
    ("session.path_missing", "No session file path is configured and no config directory exists."),
    ("session.failed", "Session storage error: {error}"),
    ("client.build_failed", "Failed to build the API client: {error}"),
    ("navigate.login", "Run `biou-console login` to sign in again."),
    ("navigate.other", "Next: {route}"),
    ("login.invalid_username", "Username must be 2-50 letters, digits, or underscores."),
    ("login.invalid_password", "Password must be 6-100 characters."),
    ("login.password_missing", "A password is required (use --password or --password-stdin)."),
    ("login.password_read_failed", "Failed to read the password from stdin: {error}"),
    ("login.success", "Signed in as {username}."),
    ("logout.success", "Signed out."),
    ("whoami.anonymous", "Not signed in."),
    ("whoami.user", "{username} (id {id})"),
    ("whoami.email", "Email: {email}"),
    ("whoami.phone", "Phone: {phone}"),
    ("whoami.roles", "Roles: {roles}"),
    ("dashboard.header", "Log totals for the last {days} days:"),
    ("dashboard.row", "{kind}: {total} total, {today} today"),
    ("dashboard.kind.audit", "Audit logs"),
    ("dashboard.kind.system", "System logs"),
    ("dashboard.kind.login", "Login logs"),
    ("dashboard.grand_total", "All logs: {total}"),
    ("dashboard.monitor_unavailable", "Monitor data unavailable."),
    ("monitor.usage", "CPU {cpu}% | Memory {memory}% | Disk {disk}%"),
    ("monitor.network", "Network: {received} received, {sent} sent"),
    ("logs.page", "Page {current}/{pages}, {total} records"),
    ("logs.empty", "No records."),
    ("logs.status.success", "success"),
    ("logs.status.failure", "failure"),
    ("logs.row.audit", "{time}  {username}  {operation}  {module}  {status}  {ip}  {duration}ms"),
    ("logs.row.system", "{time}  {level}  {logger}  {message}"),
    ("logs.row.login", "{time}  {username}  {login_type}  {status}  {ip}  {location}"),
    ("export.saved", "Saved {path}"),
    ("clean.expired_header", "Removed expired records:"),
    ("clean.expired_row", "{kind}: {count}"),
    ("clean.count", "Removed {count} records."),
    ("system.info", "{name} {version} ({os} {os_version}, {cpus} CPUs)"),
    ("system.memory", "Memory: {used} used / {total} total, {free} free"),
    ("system.health", "Status {status} | Database {database} | Redis {redis} | Disk {disk} | Uptime {uptime}"),
    ("prefs.theme", "Theme: {value}"),
    ("prefs.language", "Language: {value}"),
    ("prefs.sidebar", "Sidebar collapsed: {value}"),
    ("prefs.unset", "(unset)"),
    ("prefs.invalid_language", "Unsupported language: {value}. Expected 'en' or 'zh-CN'."),
    ("logging.open_failed", "Failed to open the request log {path}: {error}"),
    ("refresh.success", "Session token refreshed."),
    ("password.changed", "Password changed."),
    ("password.missing", "Both the current and the new password are required on stdin."),
];

/// Simplified Chinese catalog entries.
const CATALOG_ZH_CN: &[(&str, &str)] = &[
    ("notice.network_unreachable", "网络连接异常，请检查网络设置"),
    ("notice.session_expired", "登录已过期，请重新登录"),
    ("notice.forbidden", "权限不足，请联系管理员"),
    ("notice.resource_not_found", "请求的资源不存在"),
    ("notice.endpoint_not_found", "请求的接口不存在"),
    ("notice.server_error", "服务器内部错误，请稍后重试"),
    ("notice.request_failed_status", "请求失败: {status}"),
    ("notice.request_failed", "请求失败"),
    ("notice.unauthorized", "未授权"),
    ("notice.level.info", "提示"),
    ("notice.level.success", "成功"),
    ("notice.level.warning", "警告"),
    ("notice.level.error", "错误"),
    ("main.version", "biou-console {version}"),
    ("i18n.lang.invalid_env", "{env} 的取值无效：{value}。应为 'en' 或 'zh-CN'。"),
    ("i18n.lang.invalid_config", "配置中的 ui.locale 不受支持：{value}。"),
    ("output.stream.stdout", "标准输出"),
    ("output.stream.stderr", "标准错误"),
    ("output.write_failed", "写入{stream}失败：{error}"),
    ("config.load_failed", "加载配置失败：{error}"),
    ("session.path_missing", "未配置会话文件路径，且系统没有配置目录。"),
    ("session.failed", "会话存储错误：{error}"),
    ("client.build_failed", "创建 API 客户端失败：{error}"),
    ("navigate.login", "请运行 `biou-console login` 重新登录。"),
    ("navigate.other", "下一步：{route}"),
    ("login.invalid_username", "用户名必须是2-50位字母、数字或下划线"),
    ("login.invalid_password", "密码长度必须在6-100位之间"),
    ("login.password_missing", "需要提供密码（使用 --password 或 --password-stdin）。"),
    ("login.password_read_failed", "从标准输入读取密码失败：{error}"),
    ("login.success", "已登录：{username}"),
    ("logout.success", "已退出登录"),
    ("whoami.anonymous", "未登录"),
    ("whoami.user", "{username}（ID {id}）"),
    ("whoami.email", "邮箱：{email}"),
    ("whoami.phone", "手机号：{phone}"),
    ("whoami.roles", "角色：{roles}"),
    ("dashboard.header", "最近 {days} 天日志统计："),
    ("dashboard.row", "{kind}：共 {total} 条，今日 {today} 条"),
    ("dashboard.kind.audit", "审计日志"),
    ("dashboard.kind.system", "系统日志"),
    ("dashboard.kind.login", "登录日志"),
    ("dashboard.grand_total", "日志总数：{total}"),
    ("dashboard.monitor_unavailable", "系统监控数据不可用"),
    ("monitor.usage", "CPU {cpu}% | 内存 {memory}% | 磁盘 {disk}%"),
    ("monitor.network", "网络：接收 {received}，发送 {sent}"),
    ("logs.page", "第 {current}/{pages} 页，共 {total} 条"),
    ("logs.empty", "暂无数据"),
    ("logs.status.success", "成功"),
    ("logs.status.failure", "失败"),
    ("logs.row.audit", "{time}  {username}  {operation}  {module}  {status}  {ip}  {duration}ms"),
    ("logs.row.system", "{time}  {level}  {logger}  {message}"),
    ("logs.row.login", "{time}  {username}  {login_type}  {status}  {ip}  {location}"),
    ("export.saved", "已保存：{path}"),
    ("clean.expired_header", "已清理过期日志："),
    ("clean.expired_row", "{kind}：{count}"),
    ("clean.count", "已清理 {count} 条记录"),
    ("system.info", "{name} {version}（{os} {os_version}，{cpus} 核）"),
    ("system.memory", "内存：已用 {used} / 总计 {total}，空闲 {free}"),
    ("system.health", "状态 {status} | 数据库 {database} | Redis {redis} | 磁盘 {disk} | 运行时长 {uptime}"),
    ("prefs.theme", "主题：{value}"),
    ("prefs.language", "语言：{value}"),
    ("prefs.sidebar", "侧边栏折叠：{value}"),
    ("prefs.unset", "（未设置）"),
    ("prefs.invalid_language", "不支持的语言：{value}。应为 'en' 或 'zh-CN'。"),
    ("logging.open_failed", "无法打开请求日志 {path}：{error}"),
    ("refresh.success", "令牌已刷新"),
    ("password.changed", "密码已修改"),
    ("password.missing", "需要从标准输入提供当前密码和新密码。"),
];

/// Returns the raw catalog entries for `locale`.
#[must_use]
pub fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::ZhCn => CATALOG_ZH_CN,
    }
}

/// Returns the message catalog for the requested locale.
#[must_use]
pub fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ZH_CN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::ZhCn => CATALOG_ZH_CN_MAP.get_or_init(|| CATALOG_ZH_CN.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` in the process-wide locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Translates `key` in `locale` while substituting `args`.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
