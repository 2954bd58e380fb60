//! Chat session lifecycle service.

use chrono::Utc;
use dailylog_types::chat::{ChatMessage, ChatSession, MessageRole};
use dailylog_types::error::ChatError;
use dailylog_types::user::User;
use tracing::info;
use uuid::Uuid;

use crate::prompt::{OPENING_MESSAGE, RECENT_DIARY_LIMIT, SystemPromptBuilder};
use crate::repository::{ChatRepository, DiaryRepository};

/// Owns chat-session lifecycle: create-or-return, end, point lookups.
///
/// The "one active session per user" invariant is enforced by the store's
/// find-active query (plus its unique index), not by in-process locking;
/// concurrent callers may race.
pub struct SessionService<C: ChatRepository, D: DiaryRepository> {
    chat_repo: C,
    diary_repo: D,
}

impl<C: ChatRepository, D: DiaryRepository> SessionService<C, D> {
    pub fn new(chat_repo: C, diary_repo: D) -> Self {
        Self {
            chat_repo,
            diary_repo,
        }
    }

    /// Return the user's active session, or create one.
    ///
    /// A new session is seeded with one system message (persona + profile +
    /// up to the ten most recent diaries) and one assistant opening message.
    pub async fn get_or_create(&self, user: &User) -> Result<ChatSession, ChatError> {
        if let Some(session) = self.chat_repo.find_active_session(&user.id).await? {
            return Ok(session);
        }

        let recent = self
            .diary_repo
            .list(&user.id, None, RECENT_DIARY_LIMIT as i64)
            .await?;

        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id: user.id,
            active: true,
            messages: vec![
                ChatMessage::new(
                    user.id,
                    MessageRole::System,
                    SystemPromptBuilder::build(user, &recent),
                ),
                ChatMessage::new(user.id, MessageRole::Assistant, OPENING_MESSAGE.to_string()),
            ],
            created_at: now,
            updated_at: now,
        };

        let session = self.chat_repo.create_session(&session).await?;
        info!(session_id = %session.id, user_id = %user.id, "Chat session created");
        Ok(session)
    }

    /// End a session by id.
    ///
    /// Fails with `SessionNotFound` when no such session exists; ending an
    /// already-ended session is a no-op that leaves the same final state.
    pub async fn end_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        self.chat_repo
            .find_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        self.chat_repo.end_session(session_id).await?;
        info!(session_id = %session_id, "Chat session ended");
        Ok(())
    }

    /// End the user's current active session.
    pub async fn end_current(&self, user_id: &Uuid) -> Result<(), ChatError> {
        let session = self
            .chat_repo
            .find_active_session(user_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        self.chat_repo.end_session(&session.id).await?;
        info!(session_id = %session.id, user_id = %user_id, "Current chat session ended");
        Ok(())
    }

    /// A session by id, with its transcript.
    pub async fn find_session(&self, session_id: &Uuid) -> Result<ChatSession, ChatError> {
        self.chat_repo
            .find_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    /// A single message within a session.
    pub async fn find_message(
        &self,
        session_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<ChatMessage, ChatError> {
        self.chat_repo
            .find_message(session_id, message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)
    }
}
