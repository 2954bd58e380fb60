//! Forwarded-identity extractor.
//!
//! Account authentication lives in the upstream gateway; by the time a
//! request reaches this service the gateway has verified the caller and
//! forwards their id in the `X-User-Id` header. Extracting [`CurrentUser`]
//! parses that header and loads the user row.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use dailylog_core::repository::UserRepository;
use dailylog_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated user for this request.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".to_string()))?;

        let id_str = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header encoding".to_string()))?;

        let user_id: Uuid = id_str
            .trim()
            .parse()
            .map_err(|_| AppError::Unauthorized(format!("Invalid user id: {id_str}")))?;

        let user = state
            .user_repo
            .find_by_id(&user_id)
            .await
            .map_err(|e| AppError::Internal(format!("Database error: {e}")))?
            .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

        Ok(CurrentUser(user))
    }
}
