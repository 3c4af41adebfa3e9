//! Castboard server binary
//!
//! Environment:
//! - `PORT`: listen port (default 5000)
//! - `CASTBOARD_ADMIN_USER` / `CASTBOARD_ADMIN_PASS`: admin credential pair
//! - `RUST_LOG`: tracing filter (e.g. `castboard=debug`)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use castboard::server::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("castboard=info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let mut config = ServerConfig::with_addr(addr);
    if let (Ok(user), Ok(pass)) = (
        std::env::var("CASTBOARD_ADMIN_USER"),
        std::env::var("CASTBOARD_ADMIN_PASS"),
    ) {
        config = config.admin_credentials(user, pass);
    }

    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Castboard server listening");
    axum::serve(listener, app).await
}
