//! In-memory content store
//!
//! Reference implementation of [`ContentProvider`]: two maps behind a
//! `std::sync::RwLock`. Nothing here awaits, so a blocking lock is fine even
//! under tokio.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::clock::unix_ms;
use crate::{Error, Result};

use super::{ContentProvider, Message, MessageDraft, PinnedSettings};

/// In-memory message and settings store
pub struct MemoryContent {
    messages: RwLock<HashMap<String, Message>>,
    pinned: RwLock<HashMap<String, PinnedSettings>>,
    next_id: AtomicU64,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(HashMap::new()),
            pinned: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn allocate_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

impl Default for MemoryContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentProvider for MemoryContent {
    fn message(&self, workspace: &str, id: &str) -> Option<Message> {
        let messages = self.messages.read().unwrap();
        messages
            .get(id)
            .filter(|m| m.workspace_code == workspace)
            .cloned()
    }

    fn latest(&self, workspace: &str) -> Option<Message> {
        let messages = self.messages.read().unwrap();
        messages
            .values()
            .filter(|m| m.workspace_code == workspace)
            // Ties broken by id so insertion order wins within one millisecond
            .max_by_key(|m| (m.created_at, m.id.clone()))
            .cloned()
    }

    fn list(&self, workspace: &str) -> Vec<Message> {
        let messages = self.messages.read().unwrap();
        let mut out: Vec<Message> = messages
            .values()
            .filter(|m| m.workspace_code == workspace)
            .cloned()
            .collect();
        out.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        out
    }

    fn create(&self, workspace: &str, draft: MessageDraft) -> Message {
        let now = unix_ms();
        let message = Message {
            id: self.allocate_id(),
            workspace_code: workspace.to_string(),
            subject: draft.subject,
            content: draft.content,
            display_date: draft.display_date,
            created_at: now,
            updated_at: now,
        };
        self.messages
            .write()
            .unwrap()
            .insert(message.id.clone(), message.clone());
        message
    }

    fn update(&self, id: &str, draft: MessageDraft) -> Result<Message> {
        let mut messages = self.messages.write().unwrap();
        let message = messages
            .get_mut(id)
            .ok_or_else(|| Error::not_found("message"))?;
        message.subject = draft.subject;
        message.content = draft.content;
        message.display_date = draft.display_date;
        message.updated_at = unix_ms();
        Ok(message.clone())
    }

    fn delete(&self, id: &str) -> Result<Message> {
        self.messages
            .write()
            .unwrap()
            .remove(id)
            .ok_or_else(|| Error::not_found("message"))
    }

    fn pinned(&self, workspace: &str) -> PinnedSettings {
        self.pinned
            .read()
            .unwrap()
            .get(workspace)
            .cloned()
            .unwrap_or_default()
    }

    fn set_pinned_message(&self, workspace: &str, message: Option<String>, enabled: Option<bool>) -> PinnedSettings {
        let mut pinned = self.pinned.write().unwrap();
        let entry = pinned.entry(workspace.to_string()).or_default();
        if let Some(message) = message {
            entry.message = message;
        }
        if let Some(enabled) = enabled {
            entry.message_enabled = enabled;
        }
        entry.clone()
    }

    fn set_pinned_image(&self, workspace: &str, image: Option<String>, enabled: Option<bool>) -> PinnedSettings {
        let mut pinned = self.pinned.write().unwrap();
        let entry = pinned.entry(workspace.to_string()).or_default();
        if let Some(image) = image {
            entry.image = image;
        }
        if let Some(enabled) = enabled {
            entry.image_enabled = enabled;
        }
        entry.clone()
    }

    fn clear_pinned_image(&self, workspace: &str) {
        let mut pinned = self.pinned.write().unwrap();
        let entry = pinned.entry(workspace.to_string()).or_default();
        entry.image = String::new();
        entry.image_enabled = false;
    }

    fn remove_workspace(&self, workspace: &str) {
        self.messages
            .write()
            .unwrap()
            .retain(|_, m| m.workspace_code != workspace);
        self.pinned.write().unwrap().remove(workspace);
    }

    fn clear(&self) {
        self.messages.write().unwrap().clear();
        self.pinned.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(subject: &str) -> MessageDraft {
        MessageDraft {
            subject: subject.to_string(),
            content: format!("{} body", subject),
            display_date: None,
        }
    }

    #[test]
    fn test_create_and_fetch_scoped() {
        let store = MemoryContent::new();
        let created = store.create("111", draft("hello"));

        assert_eq!(store.message("111", &created.id), Some(created.clone()));
        // Same id through another workspace is invisible
        assert_eq!(store.message("222", &created.id), None);
    }

    #[test]
    fn test_latest_and_list_order() {
        let store = MemoryContent::new();
        let a = store.create("111", draft("first"));
        let b = store.create("111", draft("second"));
        store.create("999", draft("other workspace"));

        let latest = store.latest("111").unwrap();
        assert_eq!(latest.id, b.id);

        let listed = store.list("111");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[test]
    fn test_update_missing_message() {
        let store = MemoryContent::new();
        assert_eq!(
            store.update("42", draft("nope")),
            Err(Error::not_found("message"))
        );
    }

    #[test]
    fn test_delete_returns_removed() {
        let store = MemoryContent::new();
        let created = store.create("111", draft("bye"));

        let removed = store.delete(&created.id).unwrap();
        assert_eq!(removed.id, created.id);
        assert!(store.delete(&created.id).is_err());
        assert!(store.latest("111").is_none());
    }

    #[test]
    fn test_pinned_defaults_and_partial_update() {
        let store = MemoryContent::new();
        assert_eq!(store.pinned("111"), PinnedSettings::default());

        store.set_pinned_message("111", Some("pinned text".into()), None);
        let settings = store.set_pinned_message("111", None, Some(true));
        assert_eq!(settings.message, "pinned text");
        assert!(settings.message_enabled);
        // Image side untouched
        assert_eq!(settings.image, "");
        assert!(!settings.image_enabled);
    }

    #[test]
    fn test_clear_pinned_image() {
        let store = MemoryContent::new();
        store.set_pinned_image("111", Some("data:image/png;base64,xyz".into()), Some(true));
        store.clear_pinned_image("111");

        let settings = store.pinned("111");
        assert_eq!(settings.image, "");
        assert!(!settings.image_enabled);
        // Pinned text survives an image clear
        assert_eq!(settings.message, "");
    }

    #[test]
    fn test_remove_workspace_cascades() {
        let store = MemoryContent::new();
        store.create("111", draft("one"));
        store.create("111", draft("two"));
        store.set_pinned_message("111", Some("pinned".into()), Some(true));
        let kept = store.create("222", draft("kept"));

        store.remove_workspace("111");

        assert!(store.list("111").is_empty());
        assert_eq!(store.pinned("111"), PinnedSettings::default());
        assert_eq!(store.latest("222").unwrap().id, kept.id);
    }
}
