//! Administrative endpoints
//!
//! Bulk account listing and maintenance. Account deletion is the one place
//! the cascade runs: directory record, the workspace's messages and pinned
//! settings, and its live display state all go together.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{Account, PinUpdate};
use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::auth::UserDto;

/// Admin projection of an account; includes PINs so the admin screen can
/// show them, never the password hash
#[derive(Serialize)]
pub struct AdminUserDto {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub workspace_code: String,
    pub input_pin: String,
    pub display_pin: String,
    pub created_at: u64,
}

impl From<Account> for AdminUserDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            workspace_code: account.workspace_code,
            input_pin: account.input_pin,
            display_pin: account.display_pin,
            created_at: account.created_at,
        }
    }
}

/// GET /api/admin/users; newest first
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<AdminUserDto>> {
    let users = state
        .directory
        .list()
        .into_iter()
        .map(AdminUserDto::from)
        .collect();
    Json(users)
}

/// DELETE /api/admin/users/{id}; cascades to content and display state
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.directory.delete(&id)?;

    state.content.remove_workspace(&removed.workspace_code);
    state.registry.remove(&removed.workspace_code).await;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/admin/clear-all and POST /api/admin/reset-db
///
/// Wipes every account, all message content, and all live workspace state.
/// Any paired display sees a pristine workspace on its next poll.
pub async fn clear_all(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.directory.clear();
    state.content.clear();
    state.registry.clear().await;

    tracing::warn!("All data cleared");
    Json(json!({ "success": true, "message": "All data cleared" }))
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// PUT /api/admin/users/{id}/password
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    state.directory.set_password(&id, &req.password)?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinsRequest {
    pub input_pin: Option<String>,
    pub display_pin: Option<String>,
}

/// PUT /api/admin/users/{id}/pins; each provided PIN must be 4 digits
pub async fn update_pins(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePinsRequest>,
) -> Result<Json<Value>, ApiError> {
    state.directory.set_pins(
        &id,
        PinUpdate {
            input_pin: req.input_pin,
            display_pin: req.display_pin,
        },
    )?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Serialize)]
pub struct LoginAsResponse {
    pub success: bool,
    pub user: UserDto,
}

/// POST /api/admin/login-as/{id}; hand the admin a user's workspace access
pub async fn login_as(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LoginAsResponse>, ApiError> {
    let account = state
        .directory
        .by_id(&id)
        .ok_or_else(|| Error::not_found("account"))?;
    Ok(Json(LoginAsResponse {
        success: true,
        user: account.into(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDisplayNameRequest {
    #[serde(default)]
    pub workspace: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDisplayNameResponse {
    pub success: bool,
    pub display_name: String,
}

/// PUT /api/display-name; rename the display header by workspace code
pub async fn set_display_name(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetDisplayNameRequest>,
) -> Result<Json<SetDisplayNameResponse>, ApiError> {
    if req.workspace.is_empty() || req.display_name.is_empty() {
        return Err(Error::validation("workspace and display name are required").into());
    }
    state
        .directory
        .set_display_name(&req.workspace, &req.display_name)?;
    Ok(Json(SetDisplayNameResponse {
        success: true,
        display_name: req.display_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MessageDraft;
    use crate::server::config::ServerConfig;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(&ServerConfig::default()))
    }

    #[tokio::test]
    async fn test_list_exposes_pins_not_hashes() {
        let state = test_state();
        state.directory.register("shani", "secret", "Desk").unwrap();

        let users = list_users(State(state)).await;
        assert_eq!(users.0.len(), 1);
        assert_eq!(users.0[0].input_pin, "1111");

        let json = serde_json::to_value(&users.0).unwrap();
        assert!(json[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_everything() {
        let state = test_state();
        let account = state.directory.register("shani", "secret", "Desk").unwrap();
        let ws = account.workspace_code.clone();

        state.content.create(&ws, MessageDraft::default());
        state
            .content
            .set_pinned_message(&ws, Some("pinned".to_string()), Some(true));
        state.registry.set_theme(&ws, "ocean".to_string()).await;

        delete_user(State(state.clone()), Path(account.id.clone()))
            .await
            .unwrap();

        assert!(state.directory.by_id(&account.id).is_none());
        assert!(state.content.list(&ws).is_empty());
        assert!(!state.content.pinned(&ws).message_enabled);
        // Workspace state is gone; a later poll recreates pristine defaults
        assert_eq!(state.registry.theme(&ws).await, "hitech");
    }

    #[tokio::test]
    async fn test_clear_all_wipes_every_table() {
        let state = test_state();
        let account = state.directory.register("shani", "secret", "Desk").unwrap();
        let ws = account.workspace_code.clone();

        state.content.create(&ws, MessageDraft::default());
        state
            .content
            .set_pinned_message(&ws, Some("pinned".to_string()), Some(true));
        state.registry.set_theme(&ws, "ocean".to_string()).await;

        let body = clear_all(State(state.clone())).await;
        assert_eq!(body.0["success"], true);

        assert!(state.directory.list().is_empty());
        assert!(state.content.list(&ws).is_empty());
        assert!(!state.content.pinned(&ws).message_enabled);
        assert!(state.registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_pins_validation_bubbles_up() {
        let state = test_state();
        let account = state.directory.register("shani", "secret", "Desk").unwrap();

        let result = update_pins(
            State(state),
            Path(account.id),
            Json(UpdatePinsRequest {
                input_pin: Some("123".to_string()),
                display_pin: None,
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_login_as_and_rename() {
        let state = test_state();
        let account = state.directory.register("shani", "secret", "Desk").unwrap();

        let as_user = login_as(State(state.clone()), Path(account.id.clone()))
            .await
            .unwrap();
        assert_eq!(as_user.0.user.username, "shani");

        set_display_name(
            State(state.clone()),
            Json(SetDisplayNameRequest {
                workspace: account.workspace_code.clone(),
                display_name: "Renamed Desk".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            state.directory.by_id(&account.id).unwrap().display_name,
            "Renamed Desk"
        );
    }
}
