//! Content provider seam
//!
//! Messages and per-workspace pinned settings live behind the
//! [`ContentProvider`] trait. The sync engine only ever reads "current or
//! latest" and rewrites "which id is active"; any durable store that can
//! answer these queries by key is an acceptable implementation. The crate
//! ships [`MemoryContent`], an in-memory table.

mod memory;

pub use memory::MemoryContent;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One broadcastable message owned by a workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Store-assigned id, unique across all workspaces
    pub id: String,
    /// Owning workspace code
    pub workspace_code: String,
    pub subject: String,
    pub content: String,
    /// Optional date shown alongside the message, unix ms
    pub display_date: Option<u64>,
    /// Creation time, unix ms; newest-first ordering key
    pub created_at: u64,
    pub updated_at: u64,
}

/// Fields supplied when creating or updating a message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageDraft {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub display_date: Option<u64>,
}

/// Per-workspace pinned content settings
///
/// The pinned text/image ride along every sync snapshot; the enabled flags
/// let the input client toggle them without clearing the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedSettings {
    pub message: String,
    pub message_enabled: bool,
    pub image: String,
    pub image_enabled: bool,
}

/// Storage contract for messages and pinned settings
///
/// Implementations must be safe to share across request handlers. All
/// message reads are scoped to a workspace: an id that exists but belongs to
/// another workspace is treated as absent.
pub trait ContentProvider: Send + Sync {
    /// Fetch a message by id, scoped to `workspace`
    fn message(&self, workspace: &str, id: &str) -> Option<Message>;

    /// The newest message for a workspace, if any
    fn latest(&self, workspace: &str) -> Option<Message>;

    /// All messages for a workspace, newest first
    fn list(&self, workspace: &str) -> Vec<Message>;

    /// Store a new message and return it with its assigned id
    fn create(&self, workspace: &str, draft: MessageDraft) -> Message;

    /// Update an existing message in place
    fn update(&self, id: &str, draft: MessageDraft) -> Result<Message>;

    /// Remove a message, returning the removed record
    fn delete(&self, id: &str) -> Result<Message>;

    /// Pinned settings for a workspace (defaults when never written)
    fn pinned(&self, workspace: &str) -> PinnedSettings;

    /// Update pinned text and/or its enabled flag; `None` leaves a field as is
    fn set_pinned_message(&self, workspace: &str, message: Option<String>, enabled: Option<bool>) -> PinnedSettings;

    /// Update pinned image and/or its enabled flag; `None` leaves a field as is
    fn set_pinned_image(&self, workspace: &str, image: Option<String>, enabled: Option<bool>) -> PinnedSettings;

    /// Drop the pinned image and disable it
    fn clear_pinned_image(&self, workspace: &str);

    /// Remove every message and setting owned by a workspace
    fn remove_workspace(&self, workspace: &str);

    /// Drop every message and setting across all workspaces
    fn clear(&self);
}
