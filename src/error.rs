//! Crate-wide error types
//!
//! All request-terminal failures funnel into [`Error`]; the HTTP layer maps
//! variants onto status codes. Silent self-healing (active-message fallback,
//! pairing-code eviction) is normal operation and never produces an error.

/// Error type for castboard operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Referenced entity does not exist (or has already expired)
    NotFound(String),
    /// Input failed validation (missing field, malformed PIN, duplicate name)
    Validation(String),
    /// Credential mismatch; deliberately does not say whether the subject
    /// exists or the secret was wrong
    Unauthorized,
}

impl Error {
    /// Shorthand for a `NotFound` with a formatted subject
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// Shorthand for a `Validation` error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(what) => write!(f, "{} not found", what),
            Error::Validation(msg) => write!(f, "{}", msg),
            Error::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
