use uuid::Uuid;

use crate::http::error::AppError;

pub mod chat;
pub mod diary;
pub mod thumbnail;

/// Parse a path segment as a UUID, rejecting malformed ids with a 400
/// before any service call.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}
