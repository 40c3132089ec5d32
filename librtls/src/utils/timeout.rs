//! Timeout helpers shared by transports and the upgrade session.

use std::time::Duration;

/// Default read timeout in milliseconds used when a caller doesn't provide
/// an explicit timeout.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convert a Duration to whole milliseconds, saturating at `u64::MAX`.
pub fn to_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
