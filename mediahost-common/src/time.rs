//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as whole seconds since the Unix epoch
pub fn unix_timestamp() -> i64 {
    now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_now_returns_recent_timestamp() {
        let timestamp = now();
        // Should be reasonably recent (before year 2100)
        assert!(timestamp.timestamp() < 4_102_444_800); // 2100-01-01 00:00:00 UTC
    }

    #[test]
    fn test_unix_timestamp_matches_now() {
        let before = now().timestamp();
        let ts = unix_timestamp();
        let after = now().timestamp();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_unix_timestamp_advances() {
        let first = unix_timestamp();
        std::thread::sleep(Duration::from_millis(1100));
        let second = unix_timestamp();
        assert!(second > first);
    }
}
