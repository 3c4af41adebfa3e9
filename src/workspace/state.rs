//! Per-workspace display state

use crate::clock::unix_ms;

/// Theme shown before an input client ever picks one
pub const DEFAULT_THEME: &str = "hitech";

/// Mutable display state for a single workspace
///
/// `last_explicit_change` is the alert marker: it advances only when an
/// input client deliberately switches content, never when the registry
/// silently repairs a dangling active pointer. Display clients diff it
/// across polls to decide whether to raise an attention alert.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    /// Currently shown message; `None` means "show latest"
    pub active_message_id: Option<String>,
    /// Symbolic theme identifier
    pub active_theme: String,
    /// Monotonically non-decreasing unix-ms marker of the last explicit
    /// content switch; 0 until the first one
    pub last_explicit_change: u64,
    /// Whether a TV display has claimed this workspace
    pub tv_connected: bool,
    /// When the TV paired, unix ms
    pub tv_connected_at: Option<u64>,
    /// One-shot flag: the paired display must drop its session
    pub disconnected: bool,
    /// When the forced disconnect was requested, unix ms
    pub disconnected_at: Option<u64>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            active_message_id: None,
            active_theme: DEFAULT_THEME.to_string(),
            last_explicit_change: 0,
            tv_connected: false,
            tv_connected_at: None,
            disconnected: false,
            disconnected_at: None,
        }
    }

    /// Record an explicit "show this now" action
    ///
    /// Always advances the marker strictly, even when the clock has not
    /// ticked since the previous call or the id is unchanged.
    pub fn mark_explicit_change(&mut self) {
        self.last_explicit_change = unix_ms().max(self.last_explicit_change + 1);
    }

    /// Mark a TV display as paired to this workspace
    pub fn mark_tv_connected(&mut self) {
        self.tv_connected = true;
        self.tv_connected_at = Some(unix_ms());
    }

    /// Request a forced logout of the paired display
    pub fn mark_disconnected(&mut self) {
        self.disconnected = true;
        self.disconnected_at = Some(unix_ms());
        self.tv_connected = false;
    }

    /// Read-and-clear the forced-disconnect flag
    ///
    /// At-most-once by construction: only the first poll after a
    /// [`mark_disconnected`](Self::mark_disconnected) observes `true`.
    pub fn take_disconnected(&mut self) -> bool {
        let was = self.disconnected;
        self.disconnected = false;
        was
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
