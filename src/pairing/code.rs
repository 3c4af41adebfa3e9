//! Pairing code record

use std::time::{Duration, Instant};

use crate::clock::unix_ms;

/// How long an unclaimed pairing code stays valid
pub const PAIRING_CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// One live pairing code
///
/// `workspace_code` and `display_name` are populated only once a phone has
/// claimed the code. Expiry is tracked on a monotonic clock; `created_at`
/// is the wall-clock twin for diagnostics.
#[derive(Debug, Clone)]
pub struct PairingCode {
    /// Three-digit numeric code shown on the TV
    pub code: String,
    /// Creation time, unix ms
    pub created_at: u64,
    /// Creation instant for TTL accounting
    pub issued_at: Instant,
    /// Whether a phone has claimed this code
    pub paired: bool,
    /// Claiming workspace, set on pairing
    pub workspace_code: Option<String>,
    /// Claiming workspace's display name, set on pairing
    pub display_name: Option<String>,
}

impl PairingCode {
    pub fn new(code: String, ttl_reference: Instant) -> Self {
        Self {
            code,
            created_at: unix_ms(),
            issued_at: ttl_reference,
            paired: false,
            workspace_code: None,
            display_name: None,
        }
    }

    /// Whether this code has outlived its TTL
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.issued_at) > ttl
    }

    /// Claim the code for a workspace
    ///
    /// Re-claiming an already-paired code is allowed and re-points it at the
    /// caller; last writer wins until the TV's first check consumes it.
    pub fn pair(&mut self, workspace_code: String, display_name: String) {
        self.paired = true;
        self.workspace_code = Some(workspace_code);
        self.display_name = Some(display_name);
    }
}
