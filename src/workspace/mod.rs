//! Workspace registry
//!
//! One mutable state record per workspace code; the ground truth for "what
//! is currently shown". Entries are created lazily on first reference and
//! live for the process lifetime (an orphaned poll against an unknown code
//! simply materializes a default record).
//!
//! # Architecture
//!
//! ```text
//!                      Arc<WorkspaceRegistry>
//!                 ┌────────────────────────────┐
//!                 │ workspaces: HashMap<code,  │
//!                 │   WorkspaceState {         │
//!                 │     active_message_id,     │
//!                 │     last_explicit_change,  │
//!                 │     tv_connected, ...      │
//!                 │   }                        │
//!                 │ >                          │
//!                 └──────────┬─────────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        ▼                   ▼                   ▼
//!   [input client]      [display client]    [pairing broker]
//!   set_active_message  resolve_active      mark_tv_connected
//! ```
//!
//! The map is guarded by an outer `RwLock`; each entry sits behind its own
//! lock so check-then-act sequences (active-message fallback) stay atomic
//! per workspace.

mod registry;
mod state;

pub use registry::{TvStatus, WorkspaceRegistry};
pub use state::{WorkspaceState, DEFAULT_THEME};
