//! Route table and shared extractors

mod admin;
mod auth;
mod messages;
mod pinned;
mod sync;
mod tv;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;

/// Query shape for every read endpoint scoped to a workspace
///
/// Supplying it is mandatory; axum rejects a missing `workspace` with 400.
#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceQuery {
    pub workspace: String,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the full API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // TV pairing
        .route("/api/tv/generate-code", post(tv::generate_code))
        .route("/api/tv/check-pairing/:code", get(tv::check_pairing))
        .route("/api/tv/pair", post(tv::pair))
        .route("/api/tv/status", get(tv::status))
        .route("/api/tv/disconnect", post(tv::disconnect))
        .route("/api/tv/check-disconnect", get(tv::check_disconnect))
        // Display sync
        .route(
            "/api/active-message",
            get(sync::get_active_message).post(sync::set_active_message),
        )
        .route(
            "/api/active-theme",
            get(sync::get_theme).post(sync::set_theme),
        )
        // Accounts
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/pin-login", post(auth::pin_login))
        .route("/api/auth/admin-login", post(auth::admin_login))
        .route("/api/auth/workspace/:code", get(auth::workspace_lookup))
        // Messages
        .route(
            "/api/messages",
            get(messages::list).post(messages::create),
        )
        .route("/api/messages/latest", get(messages::latest))
        .route(
            "/api/messages/:id",
            get(messages::get_one)
                .put(messages::update)
                .delete(messages::remove),
        )
        // Pinned content
        .route(
            "/api/pinned-message",
            get(pinned::get_message).post(pinned::set_message),
        )
        .route(
            "/api/pinned-image",
            get(pinned::get_image)
                .post(pinned::set_image)
                .delete(pinned::delete_image),
        )
        // Admin surface
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/clear-all", delete(admin::clear_all))
        .route("/api/admin/reset-db", post(admin::clear_all))
        .route("/api/admin/users/:id", delete(admin::delete_user))
        .route("/api/admin/users/:id/password", put(admin::update_password))
        .route("/api/admin/users/:id/pins", put(admin::update_pins))
        .route("/api/admin/login-as/:id", post(admin::login_as))
        .route("/api/display-name", put(admin::set_display_name))
        .route("/api/health", get(health))
        .with_state(state)
}
