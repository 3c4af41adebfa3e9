//! Message CRUD endpoints
//!
//! The content store owns the records; the one piece of sync logic here is
//! the delete path, which silently repairs the workspace's active pointer
//! when its target goes away.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::content::{Message, MessageDraft};
use crate::Error;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::WorkspaceQuery;

/// GET /api/messages?workspace=; newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    Ok(Json(state.content.list(&query.workspace)))
}

/// GET /api/messages/latest?workspace=; `null` when the workspace is empty
pub async fn latest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Option<Message>>, ApiError> {
    if query.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }
    Ok(Json(state.content.latest(&query.workspace)))
}

#[derive(Deserialize)]
pub struct MessageQuery {
    pub workspace: String,
}

/// GET /api/messages/{id}?workspace=
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Message>, ApiError> {
    let message = state
        .content
        .message(&query.workspace, &id)
        .ok_or_else(|| Error::not_found("message"))?;
    Ok(Json(message))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub display_date: Option<u64>,
    #[serde(default)]
    pub workspace: String,
}

/// POST /api/messages
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    if req.workspace.is_empty() {
        return Err(Error::validation("workspace code is required").into());
    }

    let message = state.content.create(
        &req.workspace,
        MessageDraft {
            subject: req.subject,
            content: req.content,
            display_date: req.display_date,
        },
    );
    tracing::info!(workspace = %req.workspace, id = %message.id, "Message created");
    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub display_date: Option<u64>,
}

/// PUT /api/messages/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    let message = state.content.update(
        &id,
        MessageDraft {
            subject: req.subject,
            content: req.content,
            display_date: req.display_date,
        },
    )?;
    Ok(Json(message))
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    /// Optional: when present, the workspace's active pointer is repaired
    pub workspace: Option<String>,
}

/// DELETE /api/messages/{id}?workspace=
///
/// Deleting the currently shown message silently points the workspace at
/// its newest remaining one; no alert marker movement.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    state.content.delete(&id)?;

    if let Some(workspace) = query.workspace {
        state
            .registry
            .repair_after_delete(&workspace, &id, state.content.as_ref())
            .await;
    }

    tracing::info!(id = %id, "Message deleted");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::ServerConfig;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(&ServerConfig::default()))
    }

    fn ws_query(workspace: &str) -> Query<WorkspaceQuery> {
        Query(WorkspaceQuery {
            workspace: workspace.to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_list_latest() {
        let state = test_state();

        let (status, first) = create(
            State(state.clone()),
            Json(CreateMessageRequest {
                subject: "first".to_string(),
                content: "body".to_string(),
                display_date: None,
                workspace: "111".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let (_, second) = create(
            State(state.clone()),
            Json(CreateMessageRequest {
                subject: "second".to_string(),
                content: "body".to_string(),
                display_date: None,
                workspace: "111".to_string(),
            }),
        )
        .await
        .unwrap();

        let listed = list(State(state.clone()), ws_query("111")).await.unwrap();
        assert_eq!(listed.0.len(), 2);
        assert_eq!(listed.0[0].id, second.0.id);
        assert_eq!(listed.0[1].id, first.0.id);

        let newest = latest(State(state), ws_query("111")).await.unwrap();
        assert_eq!(newest.0.unwrap().id, second.0.id);
    }

    #[tokio::test]
    async fn test_get_one_is_workspace_scoped() {
        let state = test_state();
        let message = state.content.create("111", MessageDraft::default());

        assert!(get_one(
            State(state.clone()),
            Path(message.id.clone()),
            Query(MessageQuery {
                workspace: "111".to_string()
            }),
        )
        .await
        .is_ok());

        // Right id, wrong workspace
        assert!(get_one(
            State(state),
            Path(message.id),
            Query(MessageQuery {
                workspace: "222".to_string()
            }),
        )
        .await
        .is_err());
    }

    #[tokio::test]
    async fn test_delete_repairs_active_pointer_silently() {
        let state = test_state();
        let kept = state.content.create("111", MessageDraft::default());
        let doomed = state.content.create("111", MessageDraft::default());

        let (_, marker) = state
            .registry
            .set_active_message("111", Some(doomed.id.clone()))
            .await;

        remove(
            State(state.clone()),
            Path(doomed.id),
            Query(DeleteQuery {
                workspace: Some("111".to_string()),
            }),
        )
        .await
        .unwrap();

        let (message, active_id, marker_after) = state
            .registry
            .resolve_active("111", state.content.as_ref())
            .await;
        assert_eq!(message.unwrap().id, kept.id);
        assert_eq!(active_id, Some(kept.id));
        assert_eq!(marker_after, marker);
    }

    #[tokio::test]
    async fn test_delete_unknown_message() {
        let state = test_state();
        let result = remove(
            State(state),
            Path("42".to_string()),
            Query(DeleteQuery { workspace: None }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_roundtrip() {
        let state = test_state();
        let message = state.content.create("111", MessageDraft::default());

        let updated = update(
            State(state),
            Path(message.id.clone()),
            Json(UpdateMessageRequest {
                subject: "edited".to_string(),
                content: "new body".to_string(),
                display_date: Some(1_700_000_000_000),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.0.id, message.id);
        assert_eq!(updated.0.subject, "edited");
        assert_eq!(updated.0.display_date, Some(1_700_000_000_000));
    }
}
