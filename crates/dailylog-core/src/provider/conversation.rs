//! ConversationProvider trait definition.

use dailylog_types::chat::{ChatMessage, ChatSession};
use dailylog_types::error::ProviderError;

/// Trait for the AI conversation backend.
///
/// Implementations receive the full session transcript on every call (see
/// [`crate::transcript::Transcript`] for the request mapping) and return
/// exactly one assistant message. No retry or timeout policy is imposed
/// here; failures surface to the caller unchanged.
pub trait ConversationProvider: Send + Sync {
    /// Send the session transcript and receive the assistant's reply.
    fn send(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatMessage, ProviderError>> + Send;
}
