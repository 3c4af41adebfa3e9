//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::auth::AdminCredentials;
use crate::pairing::PAIRING_CODE_TTL;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Fixed credential pair for the admin surface
    pub admin: AdminCredentials,

    /// How long an unclaimed TV pairing code stays valid
    pub pairing_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            admin: AdminCredentials::default(),
            pairing_ttl: PAIRING_CODE_TTL,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the admin credential pair
    pub fn admin_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = AdminCredentials {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Set the pairing-code TTL
    pub fn pairing_ttl(mut self, ttl: Duration) -> Self {
        self.pairing_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.pairing_ttl, Duration::from_secs(300));
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .admin_credentials("ops", "hunter2")
            .pairing_ttl(Duration::from_secs(60));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.admin.username, "ops");
        assert_eq!(config.admin.password, "hunter2");
        assert_eq!(config.pairing_ttl, Duration::from_secs(60));
    }
}
