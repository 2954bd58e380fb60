//! Diary entry type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum diary content length in characters.
pub const MIN_CONTENT_LEN: usize = 20;

/// A persisted diary entry.
///
/// Created exactly once per finalized conversation (or directly by the
/// user). Content is set at creation and changes only through explicit
/// edits; the thumbnail URL is attached later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diary {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Originating chat session, absent for user-authored entries.
    pub chat_session_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: String,
    /// The day this entry is about; defaults to the creation day.
    pub writed_at: NaiveDate,
    pub thumbnail_url: Option<String>,
    /// True when the user wrote the entry directly instead of finalizing
    /// a conversation.
    pub user_authored: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Diary {
    /// Create a new diary entry dated today.
    pub fn new(
        user_id: Uuid,
        chat_session_id: Option<Uuid>,
        title: Option<String>,
        content: String,
        user_authored: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            chat_session_id,
            title,
            content,
            writed_at: now.date_naive(),
            thumbnail_url: None,
            user_authored,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_diary_dated_today() {
        let diary = Diary::new(
            Uuid::now_v7(),
            None,
            Some("Rainy Tuesday".to_string()),
            "It rained all day and I stayed inside.".to_string(),
            false,
        );
        assert_eq!(diary.writed_at, Utc::now().date_naive());
        assert!(diary.thumbnail_url.is_none());
        assert!(!diary.user_authored);
    }

    #[test]
    fn test_diary_serialize_dates() {
        let mut diary = Diary::new(
            Uuid::now_v7(),
            Some(Uuid::now_v7()),
            None,
            "A long enough diary body for testing.".to_string(),
            true,
        );
        diary.writed_at = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let json = serde_json::to_string(&diary).unwrap();
        assert!(json.contains("\"writed_at\":\"2026-03-14\""));
        assert!(json.contains("\"user_authored\":true"));
    }
}
