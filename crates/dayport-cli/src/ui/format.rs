//! String formatting utilities for CLI output.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Truncate a string to max length, adding "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format an entry date for display in `tz`.
///
/// Pretty output shows minutes and the zone abbreviation; plain output is
/// RFC 3339 so scripts can parse it.
pub fn format_datetime(dt: &DateTime<Utc>, tz: Tz, pretty: bool) -> String {
    let local = dt.with_timezone(&tz);
    if pretty {
        local.format("%Y-%m-%d %H:%M %Z").to_string()
    } else {
        local.to_rfc3339()
    }
}

/// Format a duration in seconds for display.
pub fn format_duration_secs(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{:.0}m {:.0}s", minutes, secs - minutes * 60.0)
    }
}
