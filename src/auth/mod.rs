//! Accounts and the access gate
//!
//! One [`Account`] record per workspace, with three independent
//! verification paths against it:
//!
//! - full login with username and password,
//! - a capability-scoped PIN check (input or display PIN),
//! - the fixed admin credential pair, tied to no account at all.
//!
//! All three fail with the same uniform [`Error::Unauthorized`]; the gate
//! never says whether the subject was unknown or the secret was wrong.
//!
//! [`Error::Unauthorized`]: crate::Error::Unauthorized

mod directory;
mod gate;

pub use directory::{hash_password, Account, AccountDirectory, PinKind, PinUpdate};
pub use gate::{AccessGate, AdminCredentials};
