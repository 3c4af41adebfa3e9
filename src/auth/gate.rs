//! Access gate
//!
//! Uniform credential checks in front of the account directory. Every
//! failure collapses to `Unauthorized`; callers learn nothing about whether
//! the username or workspace exists.

use std::sync::Arc;

use crate::{Error, Result};

use super::directory::{Account, AccountDirectory, PinKind};

/// Fixed out-of-band credential pair for the administrative surface
///
/// Not tied to any account; gates only bulk listing/deletion and the other
/// admin endpoints.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "castboard".to_string(),
        }
    }
}

/// Validates the three independent credential shapes
pub struct AccessGate {
    directory: Arc<AccountDirectory>,
    admin: AdminCredentials,
}

impl AccessGate {
    pub fn new(directory: Arc<AccountDirectory>, admin: AdminCredentials) -> Self {
        Self { directory, admin }
    }

    /// Full account login; success yields the whole record
    pub fn login(&self, username: &str, password: &str) -> Result<Account> {
        let account = self
            .directory
            .by_username(username)
            .ok_or(Error::Unauthorized)?;
        if !account.verify_password(password) {
            tracing::debug!(username = %username, "Login rejected");
            return Err(Error::Unauthorized);
        }
        Ok(account)
    }

    /// Capability check scoped to one function of one workspace
    ///
    /// Success yields the account plus the verified kind, not a broader
    /// credential; the two PIN fields are fully independent secrets.
    pub fn pin_login(&self, workspace_code: &str, pin: &str, kind: PinKind) -> Result<Account> {
        let account = self
            .directory
            .by_workspace(workspace_code)
            .ok_or(Error::Unauthorized)?;
        if !account.verify_pin(kind, pin) {
            tracing::debug!(workspace = %workspace_code, kind = kind.as_str(), "PIN rejected");
            return Err(Error::Unauthorized);
        }
        Ok(account)
    }

    /// Check the fixed admin pair
    pub fn admin_login(&self, username: &str, password: &str) -> Result<()> {
        if username != self.admin.username || password != self.admin.password {
            tracing::debug!("Admin login rejected");
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PinUpdate;

    fn gate_with_account() -> (AccessGate, Account) {
        let directory = Arc::new(AccountDirectory::new());
        let account = directory.register("shani", "secret", "Front Desk").unwrap();
        directory
            .set_pins(
                &account.id,
                PinUpdate {
                    input_pin: Some("2345".to_string()),
                    display_pin: Some("9012".to_string()),
                },
            )
            .unwrap();
        let gate = AccessGate::new(directory.clone(), AdminCredentials::default());
        (gate, directory.by_id(&account.id).unwrap())
    }

    #[test]
    fn test_login_paths() {
        let (gate, account) = gate_with_account();

        let logged_in = gate.login("shani", "secret").unwrap();
        assert_eq!(logged_in.workspace_code, account.workspace_code);

        // Unknown user and wrong password are indistinguishable
        assert_eq!(gate.login("nobody", "secret"), Err(Error::Unauthorized));
        assert_eq!(gate.login("shani", "wrong"), Err(Error::Unauthorized));
    }

    #[test]
    fn test_pin_login_selects_the_right_secret() {
        let (gate, account) = gate_with_account();
        let ws = &account.workspace_code;

        assert!(gate.pin_login(ws, "9012", PinKind::Display).is_ok());
        // Same PIN value against the other kind fails
        assert_eq!(
            gate.pin_login(ws, "9012", PinKind::Input),
            Err(Error::Unauthorized)
        );
        assert_eq!(
            gate.pin_login("000", "9012", PinKind::Display),
            Err(Error::Unauthorized)
        );
    }

    #[test]
    fn test_admin_login_fixed_pair() {
        let (gate, _) = gate_with_account();

        assert!(gate.admin_login("admin", "castboard").is_ok());
        assert_eq!(
            gate.admin_login("admin", "wrong"),
            Err(Error::Unauthorized)
        );
        assert_eq!(
            gate.admin_login("shani", "secret"),
            Err(Error::Unauthorized)
        );
    }
}
