use chrono::{DateTime, Local, NaiveDateTime};

/// Naive timestamp layouts accepted from forms and from the API, tried in order.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 style timestamp.
///
/// RFC 3339 values (with offset) are converted to local time; naive values
/// such as the `datetime-local` layout `2025-06-01T18:30` are taken as-is.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
}

/// Format a timestamp for display: "Jun 01, 2025 18:30"
pub fn format_datetime(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        None if value.trim().is_empty() => "TBD".to_string(),
        // Fall back to the raw string, truncated to the date part
        None => value.chars().take(16).collect(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
