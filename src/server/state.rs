//! Shared application state

use std::sync::Arc;

use crate::auth::{AccessGate, AccountDirectory};
use crate::content::{ContentProvider, MemoryContent};
use crate::pairing::PairingBroker;
use crate::workspace::WorkspaceRegistry;

use super::config::ServerConfig;

/// Everything the request handlers share
///
/// Owned explicitly and injected via axum's `State` extractor rather than
/// reached through globals; tests build as many independent instances as
/// they like.
pub struct AppState {
    pub registry: WorkspaceRegistry,
    pub broker: PairingBroker,
    pub directory: Arc<AccountDirectory>,
    pub gate: AccessGate,
    pub content: Arc<dyn ContentProvider>,
}

impl AppState {
    /// State backed by the in-memory content store
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_content(config, Arc::new(MemoryContent::new()))
    }

    /// State with a caller-supplied content store
    pub fn with_content(config: &ServerConfig, content: Arc<dyn ContentProvider>) -> Self {
        let directory = Arc::new(AccountDirectory::new());
        Self {
            registry: WorkspaceRegistry::new(),
            broker: PairingBroker::with_ttl(config.pairing_ttl),
            directory: Arc::clone(&directory),
            gate: AccessGate::new(directory, config.admin.clone()),
            content,
        }
    }
}
