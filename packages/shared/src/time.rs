//! Timestamp helpers.
//!
//! Every timestamp on the wire is a Unix timestamp in milliseconds.

use chrono::{DateTime, FixedOffset, Utc};

/// JST offset in seconds (UTC+9)
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in JST.
///
/// Returns `None` when the timestamp is outside chrono's supported range.
pub fn timestamp_to_jst_rfc3339(millis: i64) -> Option<String> {
    let jst = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(utc.with_timezone(&jst).to_rfc3339())
}
