//! Castboard: workspace display sync and TV pairing server
//!
//! A workspace (one business or desk) broadcasts a message onto a shared
//! screen. Displays reach their workspace either via a typed access code or
//! via a scan-to-pair flow between a phone and a TV. This crate implements
//! the server side: per-workspace display state, ephemeral TV pairing codes,
//! and the polling contract that lets a passive display discover content
//! changes and decide when to raise an attention alert.
//!
//! # Architecture
//!
//! ```text
//!   input client                    display client
//!   (phone/desktop)                 (TV, polling)
//!        │ set active message            │ GET /api/active-message
//!        ▼                               ▼
//!   ┌──────────────────── Arc<AppState> ────────────────────┐
//!   │ WorkspaceRegistry   PairingBroker   AccessGate        │
//!   │  workspace code →    3-digit code →  password / PIN / │
//!   │  WorkspaceState      PairingCode     admin checks     │
//!   │         │                                             │
//!   │         └──► ContentProvider (messages, pinned)       │
//!   └───────────────────────────────────────────────────────┘
//! ```
//!
//! All "real-time" behavior is client-driven polling; the server holds no
//! persistent connections. Change detection rides on a per-workspace
//! monotonic marker advanced only by explicit "show this now" actions, never
//! by silent fallback; see [`sync`] for the contract.

pub mod auth;
pub mod clock;
pub mod content;
pub mod error;
pub mod pairing;
pub mod server;
pub mod sync;
pub mod workspace;

pub use error::{Error, Result};
