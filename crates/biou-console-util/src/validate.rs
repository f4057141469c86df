// crates/biou-console-util/src/validate.rs
// ============================================================================
// Module: Input Validation Rules
// Description: Field shape rules checked before values are sent to the API.
// Purpose: Reject obviously malformed credentials and contact fields locally.
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! Each [`Field`] has one anchored pattern. Username and password are
//! required; the remaining fields accept an empty value and only check shape
//! when something was entered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Form fields with a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 2-50 letters, digits, or underscores.
    Username,
    /// 6-100 characters.
    Password,
    /// `local@domain.tld` without whitespace.
    Email,
    /// 11-digit mobile number starting with `1[3-9]`.
    Phone,
    /// Dotted-quad IPv4 address.
    Ip,
}

impl Field {
    /// Returns a stable label for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ip => "ip",
        }
    }

    /// Returns true when an empty value is rejected.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Username | Self::Password)
    }

    /// Anchored pattern source for the field.
    const fn pattern_source(self) -> &'static str {
        match self {
            Self::Username => r"^[a-zA-Z0-9_]{2,50}$",
            Self::Password => r"^.{6,100}$",
            Self::Email => r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
            Self::Phone => r"^1[3-9][0-9]{9}$",
            Self::Ip => {
                r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
            }
        }
    }
}

/// Validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{field} is required")]
    Missing {
        /// Field label.
        field: &'static str,
    },
    /// The value does not match the field's shape.
    #[error("{field} has an invalid format")]
    Malformed {
        /// Field label.
        field: &'static str,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Checks `value` against the rule for `field`.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] for an empty required field and
/// [`ValidationError::Malformed`] when the value does not match.
pub fn validate(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        if field.is_required() {
            return Err(ValidationError::Missing {
                field: field.as_str(),
            });
        }
        return Ok(());
    }
    if matches(field, value) {
        Ok(())
    } else {
        Err(ValidationError::Malformed {
            field: field.as_str(),
        })
    }
}

/// Returns true when `value` matches the pattern for `field`.
#[must_use]
pub fn matches(field: Field, value: &str) -> bool {
    pattern(field).is_some_and(|regex| regex.is_match(value))
}

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Compiled pattern for `field`, built on first use.
fn pattern(field: Field) -> Option<&'static Regex> {
    static USERNAME: OnceLock<Option<Regex>> = OnceLock::new();
    static PASSWORD: OnceLock<Option<Regex>> = OnceLock::new();
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    static IP: OnceLock<Option<Regex>> = OnceLock::new();
    let slot = match field {
        Field::Username => &USERNAME,
        Field::Password => &PASSWORD,
        Field::Email => &EMAIL,
        Field::Phone => &PHONE,
        Field::Ip => &IP,
    };
    slot.get_or_init(|| Regex::new(field.pattern_source()).ok()).as_ref()
}
