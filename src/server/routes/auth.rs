//! Account endpoints: register, the three login paths, workspace lookup

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{Account, PinKind};
use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;

/// Public projection of an account (never carries hashes or PINs)
#[derive(Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub workspace_code: String,
}

impl From<Account> for UserDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            workspace_code: account.workspace_code,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserDto,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let account = state
        .directory
        .register(&req.username, &req.password, &req.display_name)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            user: account.into(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(Error::validation("username and password are required").into());
    }

    let account = state.gate.login(&req.username, &req.password)?;
    Ok(Json(UserResponse {
        success: true,
        user: account.into(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinLoginRequest {
    #[serde(default)]
    pub workspace_code: String,
    #[serde(default)]
    pub pin: String,
    #[serde(rename = "type")]
    pub kind: PinKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinLoginResponse {
    pub success: bool,
    pub user: UserDto,
    pub access_type: PinKind,
}

/// POST /api/auth/pin-login
///
/// A capability check scoped to one surface of one workspace; the yielded
/// `accessType` tag is not a broader credential.
pub async fn pin_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PinLoginRequest>,
) -> Result<Json<PinLoginResponse>, ApiError> {
    if req.workspace_code.is_empty() || req.pin.is_empty() {
        return Err(Error::validation("workspace code and PIN are required").into());
    }

    let account = state.gate.pin_login(&req.workspace_code, &req.pin, req.kind)?;
    Ok(Json(PinLoginResponse {
        success: true,
        user: account.into(),
        access_type: req.kind,
    }))
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub success: bool,
}

/// POST /api/auth/admin-login; fixed out-of-band pair, no account involved
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    state.gate.admin_login(&req.username, &req.password)?;
    Ok(Json(AdminLoginResponse { success: true }))
}

#[derive(Serialize)]
pub struct WorkspaceLookupResponse {
    pub success: bool,
    pub workspace: WorkspaceDto,
}

#[derive(Serialize)]
pub struct WorkspaceDto {
    pub id: String,
    pub display_name: String,
    pub workspace_code: String,
}

/// GET /api/auth/workspace/{code}; public resolution for the QR scan flow
pub async fn workspace_lookup(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<WorkspaceLookupResponse>, ApiError> {
    let account = state
        .directory
        .by_workspace(&code)
        .ok_or_else(|| Error::not_found("workspace"))?;

    Ok(Json(WorkspaceLookupResponse {
        success: true,
        workspace: WorkspaceDto {
            id: account.id,
            display_name: account.display_name,
            workspace_code: account.workspace_code,
        },
    }))
}
