// crates/biou-console-util/src/format.rs
// ============================================================================
// Module: Display Formatting
// Description: Date/time, number, and byte-size formatting helpers.
// Purpose: Render server timestamps and counters for console output.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Dates arrive from the server as strings (RFC 3339 or local
//! `YYYY-MM-DD HH:mm:ss` forms). [`format_date_time`] parses them and renders
//! a `dayjs`-style pattern. Missing input renders as [`EMPTY_PLACEHOLDER`];
//! unparseable input renders as [`INVALID_DATE`]. Nothing here panics.
//!
//! Output is rendered in the offset carried by the input, so the same string
//! always produces the same output regardless of the host time zone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::Month;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::Time;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default pattern used by [`format_date_time`].
pub const DEFAULT_DATE_TIME_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";
/// Pattern used by [`format_date`].
pub const DATE_PATTERN: &str = "YYYY-MM-DD";
/// Pattern used by [`format_time`].
pub const TIME_PATTERN: &str = "HH:mm:ss";
/// Placeholder rendered for missing input.
pub const EMPTY_PLACEHOLDER: &str = "-";
/// Placeholder rendered for input that is present but not a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Size units used by [`format_file_size`].
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

// ============================================================================
// SECTION: Date Formatting
// ============================================================================

/// Formats a date string with `pattern` (or [`DEFAULT_DATE_TIME_PATTERN`]).
///
/// # Examples
///
/// ```
/// use biou_console_util::format_date_time;
///
/// assert_eq!(format_date_time(None, None), "-");
/// assert_eq!(format_date_time(Some("2024-01-01T00:00:00Z"), Some("YYYY-MM-DD")), "2024-01-01");
/// ```
#[must_use]
pub fn format_date_time(input: Option<&str>, pattern: Option<&str>) -> String {
    let Some(raw) = input.map(str::trim).filter(|value| !value.is_empty()) else {
        return EMPTY_PLACEHOLDER.to_string();
    };
    let pattern = pattern.unwrap_or(DEFAULT_DATE_TIME_PATTERN);
    parse_moment(raw).map_or_else(|| INVALID_DATE.to_string(), |moment| render(moment, pattern))
}

/// Formats a date string as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(input: Option<&str>) -> String {
    format_date_time(input, Some(DATE_PATTERN))
}

/// Formats a date string as `HH:mm:ss`.
#[must_use]
pub fn format_time(input: Option<&str>) -> String {
    format_date_time(input, Some(TIME_PATTERN))
}

/// Formats an already-parsed timestamp with `pattern`.
#[must_use]
pub fn format_offset_date_time(value: OffsetDateTime, pattern: &str) -> String {
    render(PrimitiveDateTime::new(value.date(), value.time()), pattern)
}

/// Returns `[now - days, now]` rendered with [`DEFAULT_DATE_TIME_PATTERN`].
///
/// A range that would underflow the calendar collapses to `[now, now]`.
#[must_use]
pub fn time_range(days: u32, now: OffsetDateTime) -> (String, String) {
    let start = now.checked_sub(time::Duration::days(i64::from(days))).unwrap_or(now);
    (
        format_offset_date_time(start, DEFAULT_DATE_TIME_PATTERN),
        format_offset_date_time(now, DEFAULT_DATE_TIME_PATTERN),
    )
}

/// Parses the date forms the server is known to emit.
fn parse_moment(raw: &str) -> Option<PrimitiveDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(PrimitiveDateTime::new(parsed.date(), parsed.time()));
    }
    parse_local(raw)
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:mm:ss`, and `YYYY-MM-DDTHH:mm:ss[.fff]`.
fn parse_local(raw: &str) -> Option<PrimitiveDateTime> {
    let (date_part, time_part) = match raw.find(['T', ' ']) {
        Some(index) => (&raw[.. index], Some(raw[index + 1 ..].trim())),
        None => (raw, None),
    };
    let date = parse_date(date_part)?;
    let time = match time_part {
        Some(text) => parse_clock(text)?,
        None => Time::MIDNIGHT,
    };
    Some(PrimitiveDateTime::new(date, time))
}

/// Parses a `YYYY-MM-DD` calendar date.
fn parse_date(text: &str) -> Option<Date> {
    let mut parts = text.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u8>().ok()?;
    let day = parts.next()?.parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Parses `HH:mm[:ss[.fff]]`.
fn parse_clock(text: &str) -> Option<Time> {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };
    let mut parts = clock.split(':');
    let hour = parts.next()?.parse::<u8>().ok()?;
    let minute = parts.next()?.parse::<u8>().ok()?;
    let second = match parts.next() {
        Some(value) => value.parse::<u8>().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    let millis = match fraction {
        Some(digits) => parse_millis(digits)?,
        None => 0,
    };
    Time::from_hms_milli(hour, minute, second, millis).ok()
}

/// Reads the leading three digits of a fractional second (right-padded).
fn parse_millis(digits: &str) -> Option<u16> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let mut padded: String = digits.chars().take(3).collect();
    while padded.len() < 3 {
        padded.push('0');
    }
    padded.parse::<u16>().ok()
}

// ============================================================================
// SECTION: Pattern Rendering
// ============================================================================

/// Pattern tokens ordered longest-first so `YYYY` wins over `YY`.
const TOKENS: &[&str] =
    &["YYYY", "SSS", "YY", "MM", "DD", "HH", "hh", "mm", "ss", "M", "D", "H", "h", "m", "s", "A", "a"];

/// Renders `moment` using `dayjs`-compatible tokens; `[...]` escapes literals.
fn render(moment: PrimitiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while let Some(first) = rest.chars().next() {
        if first == '['
            && let Some(end) = rest.find(']')
        {
            out.push_str(&rest[1 .. end]);
            rest = &rest[end + 1 ..];
            continue;
        }
        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&render_token(token, moment));
            rest = &rest[token.len() ..];
            continue;
        }
        out.push(first);
        rest = &rest[first.len_utf8() ..];
    }
    out
}

/// Renders a single token.
fn render_token(token: &str, moment: PrimitiveDateTime) -> String {
    let hour = moment.hour();
    let hour12 = match hour % 12 {
        0 => 12,
        other => other,
    };
    match token {
        "YYYY" => format!("{:04}", moment.year()),
        "YY" => format!("{:02}", moment.year().rem_euclid(100)),
        "MM" => format!("{:02}", u8::from(moment.month())),
        "M" => u8::from(moment.month()).to_string(),
        "DD" => format!("{:02}", moment.day()),
        "D" => moment.day().to_string(),
        "HH" => format!("{hour:02}"),
        "H" => hour.to_string(),
        "hh" => format!("{hour12:02}"),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", moment.minute()),
        "m" => moment.minute().to_string(),
        "ss" => format!("{:02}", moment.second()),
        "s" => moment.second().to_string(),
        "SSS" => format!("{:03}", moment.millisecond()),
        "A" => if hour < 12 { "AM" } else { "PM" }.to_string(),
        "a" => if hour < 12 { "am" } else { "pm" }.to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Number Formatting
// ============================================================================

/// Abbreviates large counters as `K`, `M`, or `B` with `digits` decimals.
///
/// Values below 1000 are rendered as-is.
#[must_use]
pub fn format_number(num: f64, digits: usize) -> String {
    if num < 1_000.0 {
        return num.to_string();
    }
    if num < 1_000_000.0 {
        return format!("{:.*}K", digits, num / 1_000.0);
    }
    if num < 1_000_000_000.0 {
        return format!("{:.*}M", digits, num / 1_000_000.0);
    }
    format!("{:.*}B", digits, num / 1_000_000_000.0)
}

/// Renders a byte count with binary units and at most two decimals.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0usize;
    let mut divisor: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }
    #[allow(clippy::cast_precision_loss, reason = "Display rounding tolerates precision loss.")]
    let scaled = bytes as f64 / divisor as f64;
    let mut rendered = format!("{scaled:.2}");
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed);
    }
    format!("{rendered} {}", SIZE_UNITS[unit])
}
