//! TV pairing endpoints
//!
//! The TV shows a 3-digit code and polls for its status; the phone claims
//! the code for its workspace. Disconnect is the one cross-client signal,
//! delivered through a check-and-clear poll.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pairing::PairingStatus;
use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::WorkspaceQuery;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeResponse {
    pub pairing_code: String,
}

/// POST /api/tv/generate-code
pub async fn generate_code(State(state): State<Arc<AppState>>) -> Json<GenerateCodeResponse> {
    let code = state.broker.issue().await;
    Json(GenerateCodeResponse {
        pairing_code: code.code,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPairingResponse {
    pub paired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// GET /api/tv/check-pairing/{code}; polled by the TV
///
/// The first response that reports `paired: true` consumes the code; a
/// retry gets 404. The poller must treat that single response as
/// authoritative.
pub async fn check_pairing(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CheckPairingResponse>, ApiError> {
    match state.broker.check(&code).await? {
        PairingStatus::Pending => Ok(Json(CheckPairingResponse {
            paired: false,
            workspace_code: None,
            display_name: None,
        })),
        PairingStatus::Paired {
            workspace_code,
            display_name,
        } => Ok(Json(CheckPairingResponse {
            paired: true,
            workspace_code: Some(workspace_code),
            display_name: Some(display_name),
        })),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRequest {
    pub pairing_code: String,
    pub workspace_code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResponse {
    pub success: bool,
    pub message: String,
    pub display_name: String,
}

/// POST /api/tv/pair; called from the phone after scanning the QR
pub async fn pair(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PairRequest>,
) -> Result<Json<PairResponse>, ApiError> {
    if req.pairing_code.is_empty() || req.workspace_code.is_empty() {
        return Err(Error::validation("pairing code and workspace code are required").into());
    }

    let account = state
        .directory
        .by_workspace(&req.workspace_code)
        .ok_or_else(|| Error::not_found("workspace"))?;

    state
        .broker
        .confirm(&req.pairing_code, &req.workspace_code, &account.display_name)
        .await?;
    state.registry.mark_tv_connected(&req.workspace_code).await;

    Ok(Json(PairResponse {
        success: true,
        message: "TV paired".to_string(),
        display_name: account.display_name,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvStatusResponse {
    pub connected: bool,
    pub connected_at: Option<u64>,
}

/// GET /api/tv/status?workspace=; polled by the input client
pub async fn status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Json<TvStatusResponse> {
    let status = state.registry.tv_status(&query.workspace).await;
    Json(TvStatusResponse {
        connected: status.connected,
        connected_at: status.connected_at,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectRequest {
    pub workspace_code: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// POST /api/tv/disconnect; the input client forces the TV to log out
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DisconnectRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if req.workspace_code.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    state.registry.force_disconnect(&req.workspace_code).await;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Serialize)]
pub struct CheckDisconnectResponse {
    pub disconnected: bool,
}

/// GET /api/tv/check-disconnect?workspace=; polled by the TV; clears the
/// flag on read, so only the first poll after a disconnect sees `true`
pub async fn check_disconnect(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Json<CheckDisconnectResponse> {
    let disconnected = state.registry.take_disconnected(&query.workspace).await;
    Json(CheckDisconnectResponse { disconnected })
}
