//! Time helpers

use chrono::Utc;

/// Current time as unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
