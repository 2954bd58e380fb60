//! Chat session and conversation HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/chat/current-session - Current (or new) session with transcript
//! - DELETE /api/v1/chat/current-session - End the current session
//! - POST   /api/v1/chat/message         - Send a message, receive the AI reply

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::user::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/chat/current-session - The user's active session, creating
/// one (seeded with the opening message) if none exists.
pub async fn current_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.session_service.get_or_create(&user).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let session_json = serde_json::to_value(&session).unwrap();
    let resp = ApiResponse::success(session_json, request_id, elapsed)
        .with_link("self", "/api/v1/chat/current-session")
        .with_link("message", "/api/v1/chat/message");

    Ok(Json(resp))
}

/// DELETE /api/v1/chat/current-session - End the user's active session
/// without writing a diary.
pub async fn end_current_session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.session_service.end_current(&user.id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(serde_json::json!({"ended": true}), request_id, elapsed)
        .with_link("self", "/api/v1/chat/current-session");

    Ok(Json(resp))
}

/// Request body for sending a chat message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub session_id: Uuid,
    pub content: String,
}

/// POST /api/v1/chat/message - Relay a user message and return the
/// assistant's reply.
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Message content is empty".to_string()));
    }

    let reply = state
        .conversation_service
        .send_message(&body.session_id, body.content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let reply_json = serde_json::to_value(&reply).unwrap();
    let resp = ApiResponse::success(reply_json, request_id, elapsed)
        .with_link("self", "/api/v1/chat/message")
        .with_link("finalize", "/api/v1/diary");

    Ok(Json(resp))
}
