//! Display sync endpoints
//!
//! `GET /api/active-message` is the poll a display lives on; the POST side
//! is the input client's explicit "show this now".

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::sync::{build_snapshot, SyncSnapshot};
use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::WorkspaceQuery;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveMessageRequest {
    /// `None` resets the workspace to "show latest"
    pub message_id: Option<String>,
    pub workspace: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveMessageResponse {
    pub success: bool,
    pub active_message_id: Option<String>,
}

/// POST /api/active-message; explicit content switch, always alert-worthy
pub async fn set_active_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetActiveMessageRequest>,
) -> Result<Json<SetActiveMessageResponse>, ApiError> {
    if req.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }

    let (active_message_id, _) = state
        .registry
        .set_active_message(&req.workspace, req.message_id)
        .await;

    Ok(Json(SetActiveMessageResponse {
        success: true,
        active_message_id,
    }))
}

/// GET /api/active-message?workspace=; the display's 2-second poll
pub async fn get_active_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<SyncSnapshot>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }

    let snapshot = build_snapshot(
        &state.registry,
        state.content.as_ref(),
        &state.directory,
        &query.workspace,
    )
    .await;
    Ok(Json(snapshot))
}

#[derive(Deserialize)]
pub struct SetThemeRequest {
    pub theme: String,
    pub workspace: String,
}

#[derive(Serialize)]
pub struct ThemeResponse {
    pub success: bool,
    pub theme: String,
}

/// POST /api/active-theme
pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetThemeRequest>,
) -> Result<Json<ThemeResponse>, ApiError> {
    if req.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let theme = state.registry.set_theme(&req.workspace, req.theme).await;
    Ok(Json(ThemeResponse {
        success: true,
        theme,
    }))
}

#[derive(Serialize)]
pub struct GetThemeResponse {
    pub theme: String,
}

/// GET /api/active-theme?workspace=
pub async fn get_theme(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<GetThemeResponse>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let theme = state.registry.theme(&query.workspace).await;
    Ok(Json(GetThemeResponse { theme }))
}
