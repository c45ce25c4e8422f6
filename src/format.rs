//! Human-readable formatting for asset sizes and publish dates

use chrono::DateTime;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count the way the download tables display it:
/// whole bytes below 1 KB, otherwise one decimal place.
pub fn file_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < MIB {
        format!("{:.1} KB", b / KIB)
    } else if b < GIB {
        format!("{:.1} MB", b / MIB)
    } else {
        format!("{:.1} GB", b / GIB)
    }
}

/// Format an RFC 3339 timestamp as e.g. "Jan 5, 2024".
///
/// An unparseable timestamp falls back to the raw input so a bad upstream
/// date degrades to ugly output instead of a missing release.
pub fn publish_date(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}
