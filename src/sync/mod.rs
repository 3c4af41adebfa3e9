//! Display sync and change detection
//!
//! The read model exposed to display clients. A display polls
//! `GET /api/active-message` on a fixed cadence (2 s in the reference
//! client) and receives a [`SyncSnapshot`]; there are no server pushes.
//!
//! # Alert contract
//!
//! The client keeps the last `last_explicit_change` value it has seen,
//! `observed`. A poll is alert-worthy iff
//!
//! ```text
//! server > observed && observed > 0
//! ```
//!
//! The `observed > 0` guard suppresses an alert on the very first poll
//! after page load, where there is no meaningful previous state. Silent
//! fallback (active message deleted) never raises the marker; an explicit
//! "show this now" always does, even when the content is unchanged. The
//! client updates `observed` unconditionally after every poll, alert or
//! not; [`AlertTracker`] enforces both rules in one operation.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::AccountDirectory;
use crate::content::{ContentProvider, Message};
use crate::workspace::WorkspaceRegistry;

/// Header shown when no account owns the polled workspace yet
pub const FALLBACK_DISPLAY_NAME: &str = "Castboard";

/// One poll's worth of display state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    /// Message to render; `None` when the workspace has no messages at all
    pub message: Option<Message>,
    pub theme: String,
    pub active_message_id: Option<String>,
    /// The alert marker; see the module docs
    pub last_explicit_change: u64,
    pub pinned_message: String,
    pub pinned_message_enabled: bool,
    pub pinned_image: String,
    pub pinned_image_enabled: bool,
    pub display_name: String,
}

/// Compose a snapshot for one workspace
///
/// Runs the registry's self-healing active-message resolution, then layers
/// on pinned settings and the owning account's display name.
pub async fn build_snapshot(
    registry: &WorkspaceRegistry,
    content: &dyn ContentProvider,
    directory: &Arc<AccountDirectory>,
    workspace: &str,
) -> SyncSnapshot {
    let (message, active_message_id, last_explicit_change) =
        registry.resolve_active(workspace, content).await;
    let theme = registry.theme(workspace).await;
    let pinned = content.pinned(workspace);
    let display_name = directory
        .by_workspace(workspace)
        .map(|a| a.display_name)
        .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());

    SyncSnapshot {
        message,
        theme,
        active_message_id,
        last_explicit_change,
        pinned_message: pinned.message,
        pinned_message_enabled: pinned.message_enabled,
        pinned_image: pinned.image,
        pinned_image_enabled: pinned.image_enabled,
        display_name,
    }
}

/// Client-side observed-marker state
///
/// `observe` folds one poll into the tracker and says whether this poll
/// should raise the attention alert. The update is unconditional, so a
/// suppressed first poll still arms the tracker for the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertTracker {
    observed: u64,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the server's marker; returns whether to alert
    pub fn observe(&mut self, server_value: u64) -> bool {
        let alert = server_value > self.observed && self.observed > 0;
        self.observed = server_value;
        alert
    }

    pub fn observed(&self) -> u64 {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccountDirectory;
    use crate::content::{MemoryContent, MessageDraft};

    #[test]
    fn test_first_poll_is_suppressed() {
        let mut tracker = AlertTracker::new();
        // Server already has a non-zero marker; first poll must not alert
        assert!(!tracker.observe(1_000));
        // But the tracker armed itself: the next advance alerts
        assert!(tracker.observe(2_000));
    }

    #[test]
    fn test_unchanged_marker_never_alerts() {
        let mut tracker = AlertTracker::new();
        tracker.observe(1_000);
        assert!(!tracker.observe(1_000));
        assert!(!tracker.observe(1_000));
    }

    #[test]
    fn test_zero_marker_workspace_stays_silent() {
        // A workspace that never saw an explicit change reports 0 forever
        let mut tracker = AlertTracker::new();
        assert!(!tracker.observe(0));
        assert!(!tracker.observe(0));
        // The first explicit change after that is still the arming poll
        assert!(!tracker.observe(500));
        assert!(tracker.observe(600));
    }

    #[tokio::test]
    async fn test_snapshot_for_untouched_workspace() {
        let registry = WorkspaceRegistry::new();
        let content = MemoryContent::new();
        let directory = Arc::new(AccountDirectory::new());
        let latest = content.create(
            "A1B2C3",
            MessageDraft {
                subject: "hello".to_string(),
                ..Default::default()
            },
        );

        let snapshot = build_snapshot(&registry, &content, &directory, "A1B2C3").await;

        assert_eq!(snapshot.message.as_ref().unwrap().id, latest.id);
        assert_eq!(snapshot.active_message_id, Some(latest.id));
        assert_eq!(snapshot.last_explicit_change, 0);
        assert_eq!(snapshot.theme, "hitech");
        assert_eq!(snapshot.display_name, FALLBACK_DISPLAY_NAME);
        assert!(!snapshot.pinned_message_enabled);
    }

    #[tokio::test]
    async fn test_snapshot_carries_account_and_pinned_state() {
        let registry = WorkspaceRegistry::new();
        let content = MemoryContent::new();
        let directory = Arc::new(AccountDirectory::new());
        let account = directory.register("shani", "secret", "Front Desk").unwrap();
        let ws = account.workspace_code.clone();

        content.set_pinned_message(&ws, Some("pinned".to_string()), Some(true));

        let snapshot = build_snapshot(&registry, &content, &directory, &ws).await;

        assert_eq!(snapshot.display_name, "Front Desk");
        assert_eq!(snapshot.pinned_message, "pinned");
        assert!(snapshot.pinned_message_enabled);
        assert!(snapshot.message.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_wire_shape() {
        let registry = WorkspaceRegistry::new();
        let content = MemoryContent::new();
        let directory = Arc::new(AccountDirectory::new());

        let snapshot = build_snapshot(&registry, &content, &directory, "111").await;
        let json = serde_json::to_value(&snapshot).unwrap();

        // Wire field names are camelCase, matching the polling clients
        assert!(json.get("lastExplicitChange").is_some());
        assert!(json.get("activeMessageId").is_some());
        assert!(json.get("pinnedImageEnabled").is_some());
        assert_eq!(json["theme"], "hitech");
    }
}
