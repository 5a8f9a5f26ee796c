use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::chat::{
    open_conversation, read_thread, send_message, summaries, ConversationSummary, MessageView,
    OpenConversationForm, SendMessageForm,
};
use crate::errors::AppError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ConversationParams {
    pub q: Option<String>,
}

/// GET /api/v1/conversations
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    Query(params): Query<ConversationParams>,
    session: Session,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let (user_id, _) = session.require_user()?;
    let store = state.store.read().await;
    Ok(Json(summaries(&store, user_id, params.q.as_deref())))
}

/// POST /api/v1/conversations
pub async fn handle_open_conversation(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<OpenConversationForm>, JsonRejection>,
) -> Result<Json<ConversationSummary>, AppError> {
    let (user_id, _) = session.require_user()?;
    let Json(form) = body?;
    let mut store = state.store.write().await;
    let summary = open_conversation(&mut store, user_id, form.participant_id, Utc::now())?;
    Ok(Json(summary))
}

/// GET /api/v1/conversations/:id/messages
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let (user_id, _) = session.require_user()?;
    let mut store = state.store.write().await;
    Ok(Json(read_thread(&mut store, id, user_id)?))
}

/// POST /api/v1/conversations/:id/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    body: Result<Json<SendMessageForm>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageView>), AppError> {
    let (user_id, _) = session.require_user()?;
    let Json(form) = body?;
    let mut store = state.store.write().await;
    let message = send_message(&mut store, id, user_id, &form.content, Utc::now())?;
    Ok((StatusCode::CREATED, Json(message)))
}
