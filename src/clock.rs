//! Wall-clock helpers
//!
//! Wire-visible timestamps (`last_explicit_change`, `tv_connected_at`) are
//! unix milliseconds; TTL accounting uses `Instant` internally.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in milliseconds
pub fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
