use chrono::{DateTime, Duration, Utc};

/// Current time in UTC
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current unix timestamp in seconds
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Current time shifted by `delta`, which may be negative
pub fn add_time(delta: Duration) -> DateTime<Utc> {
    Utc::now() + delta
}
