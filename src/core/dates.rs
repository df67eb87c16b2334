//! # Date Handling
//!
//! Parsing and formatting for the two date formats that appear in the
//! record store: ISO (`YYYY-MM-DD`, written by the editor) and the
//! localized `DD.MM.YYYY` (legacy manual entries).
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use chrono::NaiveDate;

/// Storage format, used for all new writes.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Localized display format used in messages and the editor tables.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Parse a due-date cell, trying ISO first and then `DD.MM.YYYY`.
///
/// Returns `None` for empty or unparseable input; callers skip such
/// records rather than failing the scan.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_FORMAT))
        .ok()
}

/// Format a date as `DD.MM.YYYY` for human-facing output.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Format a date as `YYYY-MM-DD` for storage.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}
