//! ChatRepository trait definition.

use dailylog_types::chat::{ChatMessage, ChatSession};
use dailylog_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
///
/// Sessions embed their messages; loading a session loads the transcript
/// in insertion order.
pub trait ChatRepository: Send + Sync {
    /// Persist a new session together with its seed messages.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// The user's active session, if one exists.
    fn find_active_session(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// A session by id, with its full transcript.
    fn find_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// A single message within a session.
    fn find_message(
        &self,
        session_id: &Uuid,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatMessage>, RepositoryError>> + Send;

    /// Append a message to a session's transcript.
    fn add_message(
        &self,
        session_id: &Uuid,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Flip a session's `active` flag to false.
    ///
    /// Idempotent; returns `RepositoryError::NotFound` only when no session
    /// row exists at all.
    fn end_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
