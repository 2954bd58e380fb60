//! SQLite chat repository implementation.
//!
//! Sessions embed their messages; loading a session loads the transcript
//! ordered by message id, which is insertion order for v7 ids. The
//! one-active-session-per-user invariant is enforced by the partial unique
//! index `idx_chat_sessions_one_active`.

use dailylog_core::repository::ChatRepository;
use dailylog_types::chat::{ChatMessage, ChatSession, MessageRole};
use dailylog_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn load_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chat_messages WHERE session_id = ? ORDER BY id ASC")
            .bind(session_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }
        Ok(messages)
    }

    async fn load_session(
        &self,
        row: &sqlx::sqlite::SqliteRow,
    ) -> Result<ChatSession, RepositoryError> {
        let session_row =
            ChatSessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        let session_id = parse_uuid(&session_row.id, "session id")?;
        let messages = self.load_messages(&session_id).await?;
        session_row.into_session(messages)
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: String,
    user_id: String,
    active: i64,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            active: row.try_get("active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self, messages: Vec<ChatMessage>) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: parse_uuid(&self.id, "session id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            active: self.active != 0,
            messages,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

struct ChatMessageRow {
    id: String,
    user_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let role: MessageRole = self.role.parse().map_err(RepositoryError::Query)?;
        Ok(ChatMessage {
            id: parse_uuid(&self.id, "message id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_sessions (id, user_id, active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.active as i64)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Conflict(
                "user already has an active chat session".to_string(),
            ),
            _ => RepositoryError::Query(e.to_string()),
        })?;

        for message in &session.messages {
            insert_message(&self.pool, &session.id, message).await?;
        }

        Ok(session.clone())
    }

    async fn find_active_session(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE user_id = ? AND active = 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(self.load_session(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(self.load_session(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_message(
        &self,
        session_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_messages WHERE session_id = ? AND id = ?")
            .bind(session_id.to_string())
            .bind(message_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let msg_row = ChatMessageRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(msg_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn add_message(
        &self,
        session_id: &Uuid,
        message: &ChatMessage,
    ) -> Result<(), RepositoryError> {
        insert_message(&self.pool, session_id, message).await?;

        sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(format_datetime(&chrono::Utc::now()))
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn end_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        // SQLite counts matched rows, not changed rows, so ending an
        // already-ended session still matches and stays idempotent.
        let result = sqlx::query("UPDATE chat_sessions SET active = 0, updated_at = ? WHERE id = ?")
            .bind(format_datetime(&chrono::Utc::now()))
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

async fn insert_message(
    pool: &DatabasePool,
    session_id: &Uuid,
    message: &ChatMessage,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"INSERT INTO chat_messages (id, session_id, user_id, role, content, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(message.id.to_string())
    .bind(session_id.to_string())
    .bind(message.user_id.to_string())
    .bind(message.role.to_string())
    .bind(&message.content)
    .bind(format_datetime(&message.created_at))
    .execute(&pool.writer)
    .await
    .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::{seed_user, test_pool};
    use chrono::Utc;

    fn session_for(user_id: Uuid) -> ChatSession {
        let now = Utc::now();
        ChatSession {
            id: Uuid::now_v7(),
            user_id,
            active: true,
            messages: vec![
                ChatMessage::new(user_id, MessageRole::System, "persona".to_string()),
                ChatMessage::new(user_id, MessageRole::Assistant, "How was your day?".to_string()),
            ],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_session_persists_seed_messages_in_order() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = session_for(user.id);
        repo.create_session(&session).await.unwrap();

        let found = repo.find_session(&session.id).await.unwrap().unwrap();
        assert!(found.active);
        assert_eq!(found.messages.len(), 2);
        assert_eq!(found.messages[0].role, MessageRole::System);
        assert_eq!(found.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_second_active_session_conflicts() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        repo.create_session(&session_for(user.id)).await.unwrap();
        let err = repo.create_session(&session_for(user.id)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_end_session_frees_the_active_slot() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let first = session_for(user.id);
        repo.create_session(&first).await.unwrap();
        repo.end_session(&first.id).await.unwrap();

        assert!(repo.find_active_session(&user.id).await.unwrap().is_none());
        repo.create_session(&session_for(user.id)).await.unwrap();
    }

    #[tokio::test]
    async fn test_end_session_idempotent_but_unknown_id_not_found() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = session_for(user.id);
        repo.create_session(&session).await.unwrap();
        repo.end_session(&session.id).await.unwrap();
        repo.end_session(&session.id).await.unwrap();

        let err = repo.end_session(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_add_message_appends_to_transcript() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = session_for(user.id);
        repo.create_session(&session).await.unwrap();

        let message = ChatMessage::new(user.id, MessageRole::User, "pretty good".to_string());
        repo.add_message(&session.id, &message).await.unwrap();

        let found = repo.find_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.messages.len(), 3);
        assert_eq!(found.messages[2].content, "pretty good");

        let fetched = repo
            .find_message(&session.id, &message.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_find_message_wrong_session_returns_none() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteChatRepository::new(pool);

        let session = session_for(user.id);
        repo.create_session(&session).await.unwrap();
        let message_id = session.messages[0].id;

        assert!(repo
            .find_message(&Uuid::now_v7(), &message_id)
            .await
            .unwrap()
            .is_none());
    }
}
