// crates/biou-console-util/src/lib.rs
// ============================================================================
// Module: Biou Console Utilities
// Description: Stateless helpers shared by the console client and CLI.
// Purpose: Format dates and numbers, shape trees, mask personal data.
// Dependencies: regex, serde, serde_json, thiserror, time, tokio
// ============================================================================

//! ## Overview
//! `biou-console-util` collects the small helpers the console needs around
//! its API calls: date/number formatting, debounce and throttle wrappers,
//! deep cloning of JSON values, fail-open data masking, flat-list to tree
//! conversion, and form field validation.
//!
//! Invariants:
//! - Helpers never panic on malformed input; they fall back to a documented
//!   placeholder or return the input unchanged.
//! - Only [`timing`] holds state, and that state is private to each wrapper.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clone;
pub mod format;
pub mod json;
pub mod mask;
pub mod timing;
pub mod tree;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clone::deep_clone;
pub use format::DEFAULT_DATE_TIME_PATTERN;
pub use format::DATE_PATTERN;
pub use format::EMPTY_PLACEHOLDER;
pub use format::INVALID_DATE;
pub use format::format_date;
pub use format::format_date_time;
pub use format::format_file_size;
pub use format::format_number;
pub use format::format_offset_date_time;
pub use format::format_time;
pub use format::time_range;
pub use json::safe_json_parse;
pub use mask::MaskError;
pub use mask::MaskKind;
pub use timing::Debounced;
pub use timing::Throttled;
pub use timing::debounce;
pub use timing::throttle;
pub use tree::TreeOptions;
pub use tree::TreeReport;
pub use tree::array_to_tree;
pub use tree::build_tree;
pub use tree::find_node;
pub use tree::tree_to_array;
pub use validate::Field;
pub use validate::ValidationError;
pub use validate::validate;
