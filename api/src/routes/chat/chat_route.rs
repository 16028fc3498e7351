//! POST /api/chat: answers a question in rag or agent mode.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use contextor::Answer;
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::chat_request::ChatRequest,
};

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"question":"How long does shipping take?","mode":"rag"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<Answer>> {
    let Json(body) = payload?;

    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }
    let mode = body.mode.unwrap_or_default();
    info!(%mode, q_len = question.len(), "chat request");

    let answer = state
        .chat
        .query(question, mode)
        .await
        .map_err(|e| AppError::from_chat(e, state.expose_error_details))?;

    Ok(Json(answer))
}
