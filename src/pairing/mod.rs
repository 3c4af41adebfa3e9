//! TV pairing broker
//!
//! Short-lived numeric codes that let a phone claim a TV's display session
//! without typing a workspace code on the TV. The TV asks for a code and
//! shows it on screen; the phone submits that code together with its
//! workspace; the TV's next status poll consumes the result exactly once.
//!
//! Lifecycle of a code:
//!
//! ```text
//!   issue() ──► Pending ──confirm()──► Paired ──check()──► consumed (gone)
//!                  │
//!                  └── 5 min TTL, swept lazily on the next issue()
//! ```
//!
//! Codes are unique among currently live codes only; a value freed by
//! expiry or consumption may be handed out again.

mod broker;
mod code;

pub use broker::{PairingBroker, PairingStatus};
pub use code::{PairingCode, PAIRING_CODE_TTL};
