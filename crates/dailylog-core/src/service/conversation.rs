//! Conversation relay service.

use dailylog_types::chat::{ChatMessage, MessageRole};
use dailylog_types::error::ChatError;
use tracing::info;
use uuid::Uuid;

use crate::provider::ConversationProvider;
use crate::repository::ChatRepository;

/// Relays user turns through the conversation provider and persists both
/// sides of each exchange.
pub struct ConversationService<C: ChatRepository, P: ConversationProvider> {
    chat_repo: C,
    provider: P,
}

impl<C: ChatRepository, P: ConversationProvider> ConversationService<C, P> {
    pub fn new(chat_repo: C, provider: P) -> Self {
        Self {
            chat_repo,
            provider,
        }
    }

    /// Append the user's message, obtain the assistant reply, persist it,
    /// and return it.
    ///
    /// The user message is persisted before the provider call, so a failed
    /// reply leaves a dangling user message in the transcript. That is
    /// deliberate: callers re-invoke and the provider sees the full history
    /// again.
    pub async fn send_message(
        &self,
        session_id: &Uuid,
        content: String,
    ) -> Result<ChatMessage, ChatError> {
        let mut session = self
            .chat_repo
            .find_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let user_message = ChatMessage::new(session.user_id, MessageRole::User, content);
        self.chat_repo.add_message(session_id, &user_message).await?;
        session.messages.push(user_message);

        let reply = self.provider.send(&session).await?;
        self.chat_repo.add_message(session_id, &reply).await?;

        info!(
            session_id = %session_id,
            transcript_len = session.messages.len() + 1,
            "Conversation turn completed"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::{
        FailingConversationProvider, InMemoryChatRepository, ScriptedConversationProvider,
    };
    use dailylog_types::chat::ChatSession;
    use dailylog_types::error::ProviderError;

    async fn seeded_session(repo: &InMemoryChatRepository) -> ChatSession {
        let user_id = Uuid::now_v7();
        let now = chrono::Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id,
            active: true,
            messages: vec![ChatMessage::new(
                user_id,
                MessageRole::Assistant,
                "How was your day?".to_string(),
            )],
            created_at: now,
            updated_at: now,
        };
        repo.create_session_direct(&session).await;
        session
    }

    #[tokio::test]
    async fn test_send_message_appends_exactly_two_messages() {
        let repo = InMemoryChatRepository::default();
        let session = seeded_session(&repo).await;
        let service = ConversationService::new(
            repo.clone(),
            ScriptedConversationProvider::new("Sounds like a good day."),
        );

        let reply = service
            .send_message(&session.id, "Pretty good, actually.".to_string())
            .await
            .unwrap();

        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.content, "Sounds like a good day.");

        let stored = repo.snapshot(&session.id).await;
        assert_eq!(stored.messages.len(), 3);
        assert_eq!(stored.messages[1].role, MessageRole::User);
        assert_eq!(stored.messages[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_provider_sees_full_transcript() {
        let repo = InMemoryChatRepository::default();
        let session = seeded_session(&repo).await;
        let provider = ScriptedConversationProvider::new("ok");
        let service = ConversationService::new(repo.clone(), provider.clone());

        service
            .send_message(&session.id, "first turn".to_string())
            .await
            .unwrap();
        service
            .send_message(&session.id, "second turn".to_string())
            .await
            .unwrap();

        // Opening + user + reply + user on the second call.
        assert_eq!(provider.last_seen_len(), 4);
    }

    #[tokio::test]
    async fn test_failed_reply_keeps_user_message_persisted() {
        let repo = InMemoryChatRepository::default();
        let session = seeded_session(&repo).await;
        let service =
            ConversationService::new(repo.clone(), FailingConversationProvider::default());

        let err = service
            .send_message(&session.id, "hello?".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChatError::Provider(ProviderError::Conversation(_))
        ));

        let stored = repo.snapshot(&session.id).await;
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.messages.last().unwrap().role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_send_to_unknown_session_fails() {
        let service = ConversationService::new(
            InMemoryChatRepository::default(),
            ScriptedConversationProvider::new("ok"),
        );
        let err = service
            .send_message(&Uuid::now_v7(), "hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }
}
