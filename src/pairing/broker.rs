//! Pairing broker implementation

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::Mutex;

use crate::{Error, Result};

use super::code::{PairingCode, PAIRING_CODE_TTL};

/// Outcome of a pairing-status poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingStatus {
    /// No phone has claimed the code yet; keep polling
    Pending,
    /// A phone claimed the code; this response is delivered exactly once
    Paired {
        workspace_code: String,
        display_name: String,
    },
}

/// Broker for live pairing codes
///
/// A single `Mutex` guards the whole table: every operation mutates it and
/// the table is small (one entry per TV currently sitting on the pair
/// screen). Expired codes are swept lazily on each issue rather than on a
/// timer.
pub struct PairingBroker {
    codes: Mutex<HashMap<String, PairingCode>>,
    ttl: Duration,
}

impl PairingBroker {
    pub fn new() -> Self {
        Self::with_ttl(PAIRING_CODE_TTL)
    }

    /// Broker with a custom TTL; production uses [`PAIRING_CODE_TTL`]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh pairing code
    ///
    /// Sweeps expired unpaired codes first, then draws 3-digit candidates
    /// until one is free among the still-live codes. A just-expired value
    /// may be reused; two simultaneously live codes never collide.
    pub async fn issue(&self) -> PairingCode {
        let mut codes = self.codes.lock().await;
        let now = Instant::now();

        codes.retain(|code, entry| {
            let dead = !entry.paired && entry.is_expired(self.ttl, now);
            if dead {
                tracing::debug!(code = %code, "Pairing code expired");
            }
            !dead
        });

        let mut rng = rand::thread_rng();
        let value = loop {
            let candidate = rng.gen_range(100..1000).to_string();
            if !codes.contains_key(&candidate) {
                break candidate;
            }
        };

        let entry = PairingCode::new(value.clone(), now);
        codes.insert(value, entry.clone());

        tracing::info!(code = %entry.code, live = codes.len(), "Pairing code issued");
        entry
    }

    /// Claim a code for a workspace (called from the phone)
    ///
    /// The caller has already resolved `display_name` for the workspace; an
    /// unknown workspace never reaches the broker. Claiming an already
    /// paired code re-points it; last writer wins until the TV's first
    /// check consumes the record.
    pub async fn confirm(
        &self,
        code: &str,
        workspace_code: &str,
        display_name: &str,
    ) -> Result<()> {
        let mut codes = self.codes.lock().await;
        let now = Instant::now();

        let entry = codes.get_mut(code).ok_or_else(|| Error::not_found("pairing code"))?;
        if !entry.paired && entry.is_expired(self.ttl, now) {
            // Expired is indistinguishable from unknown for the caller
            codes.remove(code);
            return Err(Error::not_found("pairing code"));
        }

        entry.pair(workspace_code.to_string(), display_name.to_string());
        tracing::info!(code = %code, workspace = %workspace_code, "Pairing confirmed");
        Ok(())
    }

    /// Poll a code's status (called from the TV)
    ///
    /// Consumes the record on the first read that observes `Paired`: the
    /// entry is deleted before the result is returned, so a retrying poller
    /// gets `NotFound` the second time. The single paired response is
    /// authoritative.
    pub async fn check(&self, code: &str) -> Result<PairingStatus> {
        let mut codes = self.codes.lock().await;
        let now = Instant::now();

        let (paired, expired) = {
            let entry = codes.get(code).ok_or_else(|| Error::not_found("pairing code"))?;
            (entry.paired, entry.is_expired(self.ttl, now))
        };

        if paired {
            let entry = codes
                .remove(code)
                .ok_or_else(|| Error::not_found("pairing code"))?;
            tracing::info!(code = %code, "Pairing code consumed");
            return Ok(PairingStatus::Paired {
                workspace_code: entry.workspace_code.unwrap_or_default(),
                display_name: entry.display_name.unwrap_or_default(),
            });
        }

        if expired {
            codes.remove(code);
            return Err(Error::not_found("pairing code"));
        }

        Ok(PairingStatus::Pending)
    }

    /// Number of live (unswept) codes
    pub async fn live_count(&self) -> usize {
        self.codes.lock().await.len()
    }
}

impl Default for PairingBroker {
    fn default() -> Self {
        Self::new()
    }
}
