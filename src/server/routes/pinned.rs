//! Pinned message and pinned image endpoints
//!
//! Pinned content rides along every sync snapshot; these routes are the
//! input client's knobs for it. Setting a value and toggling its enabled
//! flag are independent so the stored text/image survives a toggle-off.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::WorkspaceQuery;

#[derive(Serialize)]
pub struct PinnedMessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
    pub enabled: bool,
}

/// GET /api/pinned-message?workspace=
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<PinnedMessageResponse>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let pinned = state.content.pinned(&query.workspace);
    Ok(Json(PinnedMessageResponse {
        success: None,
        message: pinned.message,
        enabled: pinned.message_enabled,
    }))
}

#[derive(Deserialize)]
pub struct SetPinnedMessageRequest {
    pub message: Option<String>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub workspace: String,
}

/// POST /api/pinned-message; absent fields leave the stored value alone
pub async fn set_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPinnedMessageRequest>,
) -> Result<Json<PinnedMessageResponse>, ApiError> {
    if req.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let pinned = state
        .content
        .set_pinned_message(&req.workspace, req.message, req.enabled);
    Ok(Json(PinnedMessageResponse {
        success: Some(true),
        message: pinned.message,
        enabled: pinned.message_enabled,
    }))
}

#[derive(Serialize)]
pub struct PinnedImageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub image: String,
    pub enabled: bool,
}

/// GET /api/pinned-image?workspace=
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<PinnedImageResponse>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let pinned = state.content.pinned(&query.workspace);
    Ok(Json(PinnedImageResponse {
        success: None,
        image: pinned.image,
        enabled: pinned.image_enabled,
    }))
}

#[derive(Deserialize)]
pub struct SetPinnedImageRequest {
    pub image: Option<String>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub workspace: String,
}

/// POST /api/pinned-image
pub async fn set_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPinnedImageRequest>,
) -> Result<Json<PinnedImageResponse>, ApiError> {
    if req.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    let pinned = state
        .content
        .set_pinned_image(&req.workspace, req.image, req.enabled);
    Ok(Json(PinnedImageResponse {
        success: Some(true),
        image: pinned.image,
        enabled: pinned.image_enabled,
    }))
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// DELETE /api/pinned-image?workspace=; drops the image and disables it
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    state.content.clear_pinned_image(&query.workspace);
    Ok(Json(SuccessResponse { success: true }))
}
