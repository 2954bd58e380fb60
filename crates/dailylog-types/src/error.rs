use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// dailylog-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from external providers: the conversation model, the image
/// generator, the raw image fetch, and object storage.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("conversation provider error: {0}")]
    Conversation(String),

    #[error("image generation error: {0}")]
    ImageGeneration(String),

    #[error("image fetch error: {0}")]
    Fetch(String),

    #[error("object storage error: {0}")]
    Storage(String),
}

/// Errors related to chat session operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat session not found")]
    SessionNotFound,

    #[error("chat message not found")]
    MessageNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors related to diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("diary not found")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("diary content too short: {length} characters, minimum {minimum}")]
    ContentTooShort { length: usize, minimum: usize },

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_content_too_short_display() {
        let err = DiaryError::ContentTooShort {
            length: 5,
            minimum: 20,
        };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_provider_error_flows_through_chat_error() {
        let err: ChatError = ProviderError::Conversation("rate limited".to_string()).into();
        assert_eq!(
            err.to_string(),
            "conversation provider error: rate limited"
        );
    }
}
