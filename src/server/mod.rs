//! HTTP surface
//!
//! Thin axum handlers over the core subsystems: every route extracts its
//! parameters, calls into the registry/broker/gate/content seams, and
//! serializes the result. No business rules live here.

pub mod config;
mod error;
mod routes;
mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
