//! Conversation provider implementations.

pub mod openai;

pub use openai::OpenAiConversationProvider;
