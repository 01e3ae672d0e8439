//! Time-related utilities shared by server and client.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

fn to_jst(timestamp_millis: i64) -> DateTime<FixedOffset> {
    jst()
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_default()
}

/// Get current Unix timestamp (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    Utc::now().with_timezone(&jst()).timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    to_jst(timestamp_millis).to_rfc3339()
}

/// Convert Unix timestamp (milliseconds) to `HH:MM:SS` in JST
pub fn timestamp_to_jst_hhmmss(timestamp_millis: i64) -> String {
    to_jst(timestamp_millis).format("%H:%M:%S").to_string()
}

/// Convert Unix timestamp (milliseconds) to `YYYY-MM-DD HH:MM:SS` in JST
pub fn timestamp_to_jst_datetime(timestamp_millis: i64) -> String {
    to_jst(timestamp_millis)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format an elapsed duration in seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24.
pub fn format_elapsed(elapsed_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        elapsed_secs / 3600,
        elapsed_secs % 3600 / 60,
        elapsed_secs % 60
    )
}
