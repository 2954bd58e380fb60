//! Thumbnail HTTP handlers.
//!
//! Endpoints:
//! - GET   /api/v1/diary/thumbnail/{id} - Generate a candidate thumbnail
//! - PATCH /api/v1/diary/{id}/thumbnail - Attach a chosen thumbnail

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::user::CurrentUser;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/diary/thumbnail/{id} - Generate a candidate thumbnail for a
/// diary. Returns the provider's transient URL; nothing is persisted until
/// the client attaches it.
pub async fn generate(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let img_url = state.thumbnail_service.generate_example(&id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({"img_url": img_url}),
        request_id,
        elapsed,
    )
    .with_link("attach", &format!("/api/v1/diary/{id}/thumbnail"));

    Ok(Json(resp))
}

/// Request body for attaching a thumbnail.
#[derive(Debug, Deserialize)]
pub struct AttachRequest {
    pub img_url: String,
}

/// PATCH /api/v1/diary/{id}/thumbnail - Copy the chosen candidate into
/// durable storage and record its permanent URL on the diary.
pub async fn attach(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(diary_id): Path<String>,
    Json(body): Json<AttachRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&diary_id)?;
    let diary = state.thumbnail_service.attach(&id, &body.img_url).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let diary_json = serde_json::to_value(&diary).unwrap();
    let resp = ApiResponse::success(diary_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/diary/{id}/thumbnail"))
        .with_link("diary", &format!("/api/v1/diary/{id}"));

    Ok(Json(resp))
}
