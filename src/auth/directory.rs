//! Account records and the in-memory account table

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::clock::unix_ms;
use crate::{Error, Result};

/// PIN set with defaults until the owner changes it
const DEFAULT_PIN: &str = "1111";

/// Which of the two independent PIN secrets a check targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    /// Gates the input (message composer) surface
    Input,
    /// Gates the display (TV) surface
    Display,
}

impl PinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PinKind::Input => "input",
            PinKind::Display => "display",
        }
    }
}

/// One registered account; owns exactly one workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    /// Globally unique login name
    pub username: String,
    /// sha-256 hex digest of the password
    pub password_hash: String,
    /// Name shown on the display header
    pub display_name: String,
    /// Globally unique workspace code, 1:1 with a workspace state record
    pub workspace_code: String,
    pub input_pin: String,
    pub display_pin: String,
    pub created_at: u64,
}

impl Account {
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }

    pub fn pin(&self, kind: PinKind) -> &str {
        match kind {
            PinKind::Input => &self.input_pin,
            PinKind::Display => &self.display_pin,
        }
    }

    pub fn verify_pin(&self, kind: PinKind, pin: &str) -> bool {
        self.pin(kind) == pin
    }
}

/// Hash a password to its sha-256 hex digest
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Optional PIN changes applied by the admin surface
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinUpdate {
    pub input_pin: Option<String>,
    pub display_pin: Option<String>,
}

/// In-memory account table
///
/// Enforces the two uniqueness invariants centrally: usernames are globally
/// unique, and every account owns exactly one workspace code that no other
/// account shares.
pub struct AccountDirectory {
    accounts: RwLock<HashMap<String, Account>>,
    next_id: AtomicU64,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new account with a freshly allocated workspace code
    pub fn register(&self, username: &str, password: &str, display_name: &str) -> Result<Account> {
        if username.is_empty() {
            return Err(Error::validation("username is required"));
        }
        if password.is_empty() {
            return Err(Error::validation("password is required"));
        }
        if display_name.is_empty() {
            return Err(Error::validation("display name is required"));
        }
        if password.len() < 4 {
            return Err(Error::validation("password must be at least 4 characters"));
        }

        let mut accounts = self.accounts.write().unwrap();
        if accounts.values().any(|a| a.username == username) {
            return Err(Error::validation("username already taken"));
        }

        // 3-digit workspace code, redrawn until unique across the table
        let mut rng = rand::thread_rng();
        let workspace_code = loop {
            let candidate = rng.gen_range(100..1000).to_string();
            if !accounts.values().any(|a| a.workspace_code == candidate) {
                break candidate;
            }
        };

        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            username: username.to_string(),
            password_hash: hash_password(password),
            display_name: display_name.to_string(),
            workspace_code,
            input_pin: DEFAULT_PIN.to_string(),
            display_pin: DEFAULT_PIN.to_string(),
            created_at: unix_ms(),
        };
        accounts.insert(account.id.clone(), account.clone());

        tracing::info!(
            username = %account.username,
            workspace = %account.workspace_code,
            "Account registered"
        );
        Ok(account)
    }

    pub fn by_id(&self, id: &str) -> Option<Account> {
        self.accounts.read().unwrap().get(id).cloned()
    }

    pub fn by_username(&self, username: &str) -> Option<Account> {
        let accounts = self.accounts.read().unwrap();
        accounts.values().find(|a| a.username == username).cloned()
    }

    pub fn by_workspace(&self, workspace_code: &str) -> Option<Account> {
        let accounts = self.accounts.read().unwrap();
        accounts
            .values()
            .find(|a| a.workspace_code == workspace_code)
            .cloned()
    }

    /// All accounts, newest first
    pub fn list(&self) -> Vec<Account> {
        let accounts = self.accounts.read().unwrap();
        let mut out: Vec<Account> = accounts.values().cloned().collect();
        out.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        out
    }

    /// Remove an account, returning it so callers can cascade by workspace
    pub fn delete(&self, id: &str) -> Result<Account> {
        let removed = self
            .accounts
            .write()
            .unwrap()
            .remove(id)
            .ok_or_else(|| Error::not_found("account"))?;

        tracing::info!(
            username = %removed.username,
            workspace = %removed.workspace_code,
            "Account deleted"
        );
        Ok(removed)
    }

    /// Drop every account (admin bulk wipe)
    pub fn clear(&self) {
        let mut accounts = self.accounts.write().unwrap();
        let dropped = accounts.len();
        accounts.clear();
        tracing::info!(accounts = dropped, "All accounts cleared");
    }

    pub fn set_password(&self, id: &str, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(Error::validation("password is required"));
        }
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts.get_mut(id).ok_or_else(|| Error::not_found("account"))?;
        account.password_hash = hash_password(password);
        Ok(())
    }

    /// Update one or both PINs; each must be exactly four digits
    pub fn set_pins(&self, id: &str, update: PinUpdate) -> Result<()> {
        for pin in [&update.input_pin, &update.display_pin].into_iter().flatten() {
            if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::validation("PIN must be exactly 4 digits"));
            }
        }
        if update.input_pin.is_none() && update.display_pin.is_none() {
            return Err(Error::validation("no PIN values provided"));
        }

        let mut accounts = self.accounts.write().unwrap();
        let account = accounts.get_mut(id).ok_or_else(|| Error::not_found("account"))?;
        if let Some(pin) = update.input_pin {
            account.input_pin = pin;
        }
        if let Some(pin) = update.display_pin {
            account.display_pin = pin;
        }
        Ok(())
    }

    /// Rename the display header, addressed by workspace code
    pub fn set_display_name(&self, workspace_code: &str, display_name: &str) -> Result<()> {
        if display_name.is_empty() {
            return Err(Error::validation("display name is required"));
        }
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .values_mut()
            .find(|a| a.workspace_code == workspace_code)
            .ok_or_else(|| Error::not_found("account"))?;
        account.display_name = display_name.to_string();
        Ok(())
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_known_vector() {
        // sha256("abc")
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_register_defaults() {
        let directory = AccountDirectory::new();
        let account = directory.register("shani", "secret", "Front Desk").unwrap();

        assert_eq!(account.input_pin, "1111");
        assert_eq!(account.display_pin, "1111");
        assert_eq!(account.workspace_code.len(), 3);
        assert!(account.verify_password("secret"));
        assert!(!account.verify_password("wrong"));
    }

    #[test]
    fn test_register_validation() {
        let directory = AccountDirectory::new();
        assert!(directory.register("", "secret", "Desk").is_err());
        assert!(directory.register("shani", "", "Desk").is_err());
        assert!(directory.register("shani", "secret", "").is_err());
        assert!(directory.register("shani", "abc", "Desk").is_err()); // too short
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let directory = AccountDirectory::new();
        directory.register("shani", "secret", "Desk A").unwrap();

        assert_eq!(
            directory.register("shani", "other", "Desk B"),
            Err(Error::validation("username already taken"))
        );
    }

    #[test]
    fn test_workspace_codes_unique() {
        let directory = AccountDirectory::new();
        let mut seen = std::collections::HashSet::new();
        for i in 0..40 {
            let account = directory
                .register(&format!("user{}", i), "secret", "Desk")
                .unwrap();
            assert!(seen.insert(account.workspace_code));
        }
    }

    #[test]
    fn test_lookup_paths() {
        let directory = AccountDirectory::new();
        let account = directory.register("shani", "secret", "Desk").unwrap();

        assert_eq!(directory.by_id(&account.id), Some(account.clone()));
        assert_eq!(directory.by_username("shani"), Some(account.clone()));
        assert_eq!(
            directory.by_workspace(&account.workspace_code),
            Some(account)
        );
        assert_eq!(directory.by_username("nobody"), None);
    }

    #[test]
    fn test_pin_verification_is_per_kind() {
        let directory = AccountDirectory::new();
        let account = directory.register("shani", "secret", "Desk").unwrap();
        directory
            .set_pins(
                &account.id,
                PinUpdate {
                    input_pin: Some("2345".to_string()),
                    display_pin: Some("9012".to_string()),
                },
            )
            .unwrap();

        let account = directory.by_id(&account.id).unwrap();
        assert!(account.verify_pin(PinKind::Display, "9012"));
        assert!(!account.verify_pin(PinKind::Input, "9012"));
        assert!(account.verify_pin(PinKind::Input, "2345"));
    }

    #[test]
    fn test_set_pins_validation() {
        let directory = AccountDirectory::new();
        let account = directory.register("shani", "secret", "Desk").unwrap();

        let bad = directory.set_pins(
            &account.id,
            PinUpdate {
                input_pin: Some("12ab".to_string()),
                display_pin: None,
            },
        );
        assert!(matches!(bad, Err(Error::Validation(_))));

        let empty = directory.set_pins(&account.id, PinUpdate::default());
        assert!(matches!(empty, Err(Error::Validation(_))));
    }

    #[test]
    fn test_set_password_and_display_name() {
        let directory = AccountDirectory::new();
        let account = directory.register("shani", "secret", "Desk").unwrap();

        directory.set_password(&account.id, "newpass").unwrap();
        assert!(directory.by_id(&account.id).unwrap().verify_password("newpass"));

        directory
            .set_display_name(&account.workspace_code, "New Desk")
            .unwrap();
        assert_eq!(
            directory.by_id(&account.id).unwrap().display_name,
            "New Desk"
        );
        assert!(directory.set_display_name("000", "Ghost").is_err());
    }

    #[test]
    fn test_list_newest_first() {
        let directory = AccountDirectory::new();
        directory.register("a", "secret", "A").unwrap();
        let b = directory.register("b", "secret", "B").unwrap();

        let listed = directory.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, b.id);
    }
}
