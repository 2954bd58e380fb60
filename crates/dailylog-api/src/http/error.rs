//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use dailylog_types::error::{ChatError, DiaryError, ProviderError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat session and conversation errors.
    Chat(ChatError),
    /// Diary errors.
    Diary(DiaryError),
    /// Identity extraction failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<DiaryError> for AppError {
    fn from(e: DiaryError) -> Self {
        AppError::Diary(e)
    }
}

fn chat_error_parts(e: &ChatError) -> (StatusCode, &'static str, String) {
    match e {
        ChatError::SessionNotFound => (
            StatusCode::NOT_FOUND,
            "SESSION_NOT_FOUND",
            "Chat session not found".to_string(),
        ),
        ChatError::MessageNotFound => (
            StatusCode::NOT_FOUND,
            "MESSAGE_NOT_FOUND",
            "Chat message not found".to_string(),
        ),
        ChatError::Repository(RepositoryError::Conflict(msg)) => {
            (StatusCode::CONFLICT, "CONFLICT", msg.clone())
        }
        ChatError::Repository(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "REPOSITORY_ERROR",
            e.to_string(),
        ),
        ChatError::Provider(e) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string()),
    }
}

fn diary_error_parts(e: &DiaryError) -> (StatusCode, &'static str, String) {
    match e {
        DiaryError::NotFound => (
            StatusCode::NOT_FOUND,
            "DIARY_NOT_FOUND",
            "Diary not found".to_string(),
        ),
        DiaryError::UserNotFound => (
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "User not found".to_string(),
        ),
        DiaryError::ContentTooShort { length, minimum } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Diary content must be at least {minimum} characters (got {length})"),
        ),
        DiaryError::Chat(e) => chat_error_parts(e),
        DiaryError::Repository(RepositoryError::Conflict(msg)) => {
            (StatusCode::CONFLICT, "CONFLICT", msg.clone())
        }
        DiaryError::Repository(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "REPOSITORY_ERROR",
            e.to_string(),
        ),
        DiaryError::Provider(e) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(e) => chat_error_parts(e),
            AppError::Diary(e) => diary_error_parts(e),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
