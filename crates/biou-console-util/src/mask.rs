// crates/biou-console-util/src/mask.rs
// ============================================================================
// Module: Data Masking
// Description: Format-preserving redaction of phone, email, IP, and ID values.
// Purpose: Keep personal data out of log listings and exports shown on screen.
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! Each mask substitutes fixed positions and keeps the overall shape:
//! - phone `13812345678` → `138****5678`
//! - email `alice@example.com` → `al***e@example.com`
//! - IPv4 `10.1.2.3` → `10.1.***.3`
//! - national ID (15 or 18 digits) → first 6 and last 3/4 kept
//!
//! The default helpers fail open: a value that does not have the expected
//! shape is returned unchanged. [`mask_strict`] reports the same condition as
//! a [`MaskError`] for callers that need to know.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kinds of values the console knows how to mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    /// 11-digit mobile number.
    Phone,
    /// Email address.
    Email,
    /// Dotted IPv4 address.
    Ip,
    /// 15- or 18-digit national ID number.
    IdCard,
}

impl MaskKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Ip => "ip",
            Self::IdCard => "id_card",
        }
    }
}

/// Strict masking errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    /// The value does not have the shape expected for its kind.
    #[error("{kind} value has an unrecognized shape")]
    Unrecognized {
        /// Label of the requested mask kind.
        kind: &'static str,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Masks `value`, returning it unchanged when the shape is not recognized.
#[must_use]
pub fn mask(kind: MaskKind, value: &str) -> String {
    try_mask(kind, value).unwrap_or_else(|| value.to_string())
}

/// Masks `value`, failing when the shape is not recognized.
///
/// # Errors
///
/// Returns [`MaskError::Unrecognized`] when `value` does not match `kind`.
pub fn mask_strict(kind: MaskKind, value: &str) -> Result<String, MaskError> {
    try_mask(kind, value).ok_or(MaskError::Unrecognized {
        kind: kind.as_str(),
    })
}

/// Masks the middle four digits of an 11-digit phone number.
#[must_use]
pub fn phone(value: &str) -> String {
    mask(MaskKind::Phone, value)
}

/// Masks the local part of an email address.
#[must_use]
pub fn email(value: &str) -> String {
    mask(MaskKind::Email, value)
}

/// Masks the third octet of an IPv4 address.
#[must_use]
pub fn ip(value: &str) -> String {
    mask(MaskKind::Ip, value)
}

/// Masks the birth-date section of a national ID number.
#[must_use]
pub fn id_card(value: &str) -> String {
    mask(MaskKind::IdCard, value)
}

// ============================================================================
// SECTION: Implementation
// ============================================================================

/// Returns the masked value, or `None` when the shape is not recognized.
fn try_mask(kind: MaskKind, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match kind {
        MaskKind::Phone => {
            if value.chars().count() != 11 {
                return None;
            }
            substitute(phone_pattern(), value, "${1}****${2}")
        }
        MaskKind::Email => mask_email(value),
        MaskKind::Ip => {
            let parts: Vec<&str> = value.split('.').collect();
            match parts.as_slice() {
                [first, second, _, fourth] => Some(format!("{first}.{second}.***.{fourth}")),
                _ => None,
            }
        }
        MaskKind::IdCard => match value.chars().count() {
            15 => substitute(id15_pattern(), value, "${1}******${2}"),
            18 => substitute(id18_pattern(), value, "${1}********${2}"),
            _ => None,
        },
    }
}

/// Keeps the first two and last character of a local part longer than two.
fn mask_email(value: &str) -> Option<String> {
    let mut parts = value.split('@');
    let username = parts.next().filter(|part| !part.is_empty())?;
    let domain = parts.next().filter(|part| !part.is_empty())?;
    let chars: Vec<char> = username.chars().collect();
    let masked = match chars.as_slice() {
        [first, second, .., last] => format!("{first}{second}***{last}"),
        _ => username.to_string(),
    };
    Some(format!("{masked}@{domain}"))
}

/// Replaces the first match of `pattern`, or `None` when there is no match.
fn substitute(pattern: Option<&Regex>, value: &str, replacement: &str) -> Option<String> {
    let pattern = pattern?;
    if !pattern.is_match(value) {
        return None;
    }
    Some(pattern.replacen(value, 1, replacement).into_owned())
}

/// Phone masking pattern.
fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]{3})[0-9]{4}([0-9]{4})").ok()).as_ref()
}

/// 15-digit national ID masking pattern.
fn id15_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]{6})[0-9]{6}([0-9]{3})").ok()).as_ref()
}

/// 18-digit national ID masking pattern.
fn id18_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]{6})[0-9]{8}([0-9]{4})").ok()).as_ref()
}
