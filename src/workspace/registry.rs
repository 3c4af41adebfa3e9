//! Workspace registry implementation
//!
//! The central registry that owns every workspace's display state and
//! mediates all mutations on it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::content::{ContentProvider, Message};

use super::state::WorkspaceState;

/// TV connection status reported to the input client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TvStatus {
    pub connected: bool,
    pub connected_at: Option<u64>,
}

/// Central registry for all workspace display state
///
/// Thread-safe via `RwLock`. The outer map lock is held only long enough to
/// find or insert an entry; per-workspace mutations run under the entry's
/// own lock, so the fallback check-then-act never races with a concurrent
/// explicit switch on the same workspace.
pub struct WorkspaceRegistry {
    /// Map of workspace code to state entry
    workspaces: RwLock<HashMap<String, Arc<RwLock<WorkspaceState>>>>,
}

impl WorkspaceRegistry {
    pub fn new() -> Self {
        Self {
            workspaces: RwLock::new(HashMap::new()),
        }
    }

    /// Get or lazily create the state entry for a workspace
    ///
    /// Never fails: an unknown code materializes a default record. A display
    /// polling a workspace nobody registered yet just sees the defaults.
    pub async fn get_or_create(&self, code: &str) -> Arc<RwLock<WorkspaceState>> {
        {
            let workspaces = self.workspaces.read().await;
            if let Some(entry) = workspaces.get(code) {
                return Arc::clone(entry);
            }
        }

        let mut workspaces = self.workspaces.write().await;
        let entry = workspaces
            .entry(code.to_string())
            .or_insert_with(|| {
                tracing::debug!(workspace = %code, "Workspace state created");
                Arc::new(RwLock::new(WorkspaceState::new()))
            });
        Arc::clone(entry)
    }

    /// Explicitly switch the shown message
    ///
    /// Always advances the explicit-change marker, even when `message_id`
    /// equals the current pointer; re-showing the same message is still an
    /// alert-worthy action. Returns the new pointer and marker.
    pub async fn set_active_message(
        &self,
        code: &str,
        message_id: Option<String>,
    ) -> (Option<String>, u64) {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;

        state.active_message_id = message_id;
        state.mark_explicit_change();

        tracing::info!(
            workspace = %code,
            message_id = ?state.active_message_id,
            marker = state.last_explicit_change,
            "Active message set"
        );

        (state.active_message_id.clone(), state.last_explicit_change)
    }

    /// Resolve the message the display should show right now
    ///
    /// Self-healing: when the pointed-at message no longer exists in the
    /// content store the pointer silently falls back to the newest remaining
    /// message, without touching the explicit-change marker. Runs entirely
    /// under the entry's write lock so the repair is atomic per workspace.
    pub async fn resolve_active(
        &self,
        code: &str,
        content: &dyn ContentProvider,
    ) -> (Option<Message>, Option<String>, u64) {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;

        let message = match state.active_message_id.clone() {
            None => {
                let latest = content.latest(code);
                if let Some(ref m) = latest {
                    state.active_message_id = Some(m.id.clone());
                }
                latest
            }
            Some(id) => match content.message(code, &id) {
                Some(m) => Some(m),
                None => {
                    // Pointed-at message was deleted out from under us
                    let latest = content.latest(code);
                    state.active_message_id = latest.as_ref().map(|m| m.id.clone());
                    tracing::debug!(
                        workspace = %code,
                        stale = %id,
                        repaired = ?state.active_message_id,
                        "Active message fallback"
                    );
                    latest
                }
            },
        };

        (
            message,
            state.active_message_id.clone(),
            state.last_explicit_change,
        )
    }

    /// Repair the active pointer after a message deletion
    ///
    /// Mirror of the fallback in [`resolve_active`](Self::resolve_active),
    /// run eagerly by the delete path: if the deleted message was the active
    /// one, point at the newest remaining message (or clear). Never advances
    /// the explicit-change marker.
    pub async fn repair_after_delete(
        &self,
        code: &str,
        deleted_id: &str,
        content: &dyn ContentProvider,
    ) {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;

        if state.active_message_id.as_deref() == Some(deleted_id) {
            state.active_message_id = content.latest(code).map(|m| m.id);
            tracing::debug!(
                workspace = %code,
                deleted = %deleted_id,
                repaired = ?state.active_message_id,
                "Active message repaired after delete"
            );
        }
    }

    /// Current theme for a workspace
    pub async fn theme(&self, code: &str) -> String {
        let entry = self.get_or_create(code).await;
        let state = entry.read().await;
        state.active_theme.clone()
    }

    /// Switch the theme; a passive restyle, not an explicit content change
    pub async fn set_theme(&self, code: &str, theme: String) -> String {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;
        state.active_theme = theme;

        tracing::info!(workspace = %code, theme = %state.active_theme, "Theme set");
        state.active_theme.clone()
    }

    /// Flag the workspace as having a paired TV
    pub async fn mark_tv_connected(&self, code: &str) {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;
        state.mark_tv_connected();

        tracing::info!(workspace = %code, "TV connected");
    }

    /// TV connection status, polled by the input client
    pub async fn tv_status(&self, code: &str) -> TvStatus {
        let entry = self.get_or_create(code).await;
        let state = entry.read().await;
        TvStatus {
            connected: state.tv_connected,
            connected_at: state.tv_connected_at,
        }
    }

    /// Ask the paired display to drop its session
    pub async fn force_disconnect(&self, code: &str) {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;
        state.mark_disconnected();

        tracing::info!(workspace = %code, "TV disconnect requested");
    }

    /// Read-and-clear the disconnect flag; the display's poll endpoint
    pub async fn take_disconnected(&self, code: &str) -> bool {
        let entry = self.get_or_create(code).await;
        let mut state = entry.write().await;
        state.take_disconnected()
    }

    /// Drop a workspace's state entirely (account deletion cascade)
    pub async fn remove(&self, code: &str) {
        let mut workspaces = self.workspaces.write().await;
        if workspaces.remove(code).is_some() {
            tracing::info!(workspace = %code, "Workspace state removed");
        }
    }

    /// Drop all workspace state (admin bulk wipe)
    pub async fn clear(&self) {
        let mut workspaces = self.workspaces.write().await;
        let dropped = workspaces.len();
        workspaces.clear();
        tracing::info!(workspaces = dropped, "All workspace state cleared");
    }

    /// Number of workspaces with materialized state
    pub async fn len(&self) -> usize {
        self.workspaces.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.workspaces.read().await.is_empty()
    }
}

impl Default for WorkspaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
