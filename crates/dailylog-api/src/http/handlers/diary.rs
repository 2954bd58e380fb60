//! Diary HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/diary                   - Finalize a conversation into a diary
//! - POST   /api/v1/diary/direct            - Write a diary without a conversation
//! - GET    /api/v1/diaries                 - List diaries (cursor pagination)
//! - GET    /api/v1/diary?writed_at=        - Diary for a given day
//! - GET    /api/v1/diary/{id}              - Diary by id
//! - GET    /api/v1/diary/{id}/chat_session - Source conversation of a diary
//! - GET    /api/v1/diary/{id}/next_prev    - Chronological neighbours
//! - PUT    /api/v1/diary/{id}              - Edit title/content
//! - DELETE /api/v1/diary/{id}              - Delete a diary

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::user::CurrentUser;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

fn diary_links<T: serde::Serialize>(
    resp: ApiResponse<T>,
    diary_id: &Uuid,
) -> ApiResponse<T> {
    resp.with_link("self", &format!("/api/v1/diary/{diary_id}"))
        .with_link("next_prev", &format!("/api/v1/diary/{diary_id}/next_prev"))
        .with_link("thumbnail", &format!("/api/v1/diary/thumbnail/{diary_id}"))
}

/// Request body for finalizing a conversation into a diary.
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub session_id: Uuid,
    pub message_id: Uuid,
}

/// POST /api/v1/diary - Turn a chosen assistant reply into a diary entry.
pub async fn finalize(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(body): Json<FinalizeRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let diary = state
        .diary_service
        .finalize(&body.session_id, &body.message_id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = diary_links(
        ApiResponse::success(diary_json, request_id, elapsed),
        &diary.id,
    );

    Ok(Json(resp))
}

/// Request body for writing a diary directly.
#[derive(Debug, Deserialize)]
pub struct DirectWriteRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// POST /api/v1/diary/direct - Write a diary without a conversation.
pub async fn write_direct(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<DirectWriteRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let diary = state
        .diary_service
        .write_direct(&user, body.title, body.content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = diary_links(
        ApiResponse::success(diary_json, request_id, elapsed),
        &diary.id,
    );

    Ok(Json(resp))
}

/// Query parameters for diary listing.
#[derive(Debug, Deserialize)]
pub struct DiaryListQuery {
    #[serde(default)]
    pub cursor_id: Option<Uuid>,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// GET /api/v1/diaries - The user's diaries, newest first.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<DiaryListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if query.size < 1 || query.size > 100 {
        return Err(AppError::Validation(
            "size must be between 1 and 100".to_string(),
        ));
    }

    let diaries = state
        .diary_service
        .list(&user.id, query.cursor_id, query.size)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diaries_json: Vec<serde_json::Value> = diaries
        .iter()
        .map(|d| serde_json::to_value(d).unwrap())
        .collect();

    let mut resp =
        ApiResponse::success(diaries_json, request_id, elapsed).with_link("self", "/api/v1/diaries");
    if let Some(last) = diaries.last() {
        resp = resp.with_link(
            "next",
            &format!("/api/v1/diaries?cursor_id={}&size={}", last.id, query.size),
        );
    }

    Ok(Json(resp))
}

/// Query parameters for the by-date lookup.
#[derive(Debug, Deserialize)]
pub struct ByDateQuery {
    pub writed_at: NaiveDate,
}

/// GET /api/v1/diary?writed_at=YYYY-MM-DD - The user's diary for a day.
pub async fn get_by_date(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let diary = state
        .diary_service
        .get_by_date(query.writed_at, &user.id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = diary_links(
        ApiResponse::success(diary_json, request_id, elapsed),
        &diary.id,
    );

    Ok(Json(resp))
}

/// GET /api/v1/diary/{id} - A diary by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let diary = state.diary_service.get_by_id(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = diary_links(
        ApiResponse::success(diary_json, request_id, elapsed),
        &diary.id,
    );

    Ok(Json(resp))
}

/// GET /api/v1/diary/{id}/chat_session - The conversation a diary came from.
pub async fn chat_session(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let session = state.diary_service.session_of(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let session_json = serde_json::to_value(&session).unwrap();
    let resp = ApiResponse::success(session_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/diary/{id}/chat_session"))
        .with_link("diary", &format!("/api/v1/diary/{id}"));

    Ok(Json(resp))
}

/// GET /api/v1/diary/{id}/next_prev - Chronological neighbours of a diary.
pub async fn next_prev(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let neighbours = state.diary_service.find_next_prev(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let payload = serde_json::json!({
        "next": neighbours.next,
        "prev": neighbours.prev,
    });
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", &format!("/api/v1/diary/{id}/next_prev"));

    Ok(Json(resp))
}

/// Request body for editing a diary.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// PUT /api/v1/diary/{id} - Edit a diary's title and content.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let diary = state
        .diary_service
        .update(&id, body.title, body.content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = diary_links(
        ApiResponse::success(diary_json, request_id, elapsed),
        &diary.id,
    );

    Ok(Json(resp))
}

/// DELETE /api/v1/diary/{id} - Delete a diary.
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    state.diary_service.delete(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(serde_json::json!({"deleted": true}), request_id, elapsed)
        .with_link("diaries", "/api/v1/diaries");

    Ok(Json(resp))
}
