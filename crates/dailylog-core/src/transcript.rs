//! Mapping from a stored session transcript to a provider request shape.
//!
//! Conversation providers take one system prompt plus alternating turns.
//! Stored sessions may contain several system messages (the seed prompt is
//! one; future context refreshes may add more), so all system messages are
//! concatenated with blank-line separators and the remaining messages pass
//! through in their original order.

use dailylog_types::chat::{ChatMessage, MessageRole};

/// A provider-ready view of a session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// All system messages joined with blank lines, if any.
    pub system: Option<String>,
    /// User/assistant turns in original order.
    pub turns: Vec<TranscriptTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptTurn {
    pub role: MessageRole,
    pub content: String,
}

impl Transcript {
    /// Build a transcript from the full message history of a session.
    ///
    /// No truncation: the provider sees the whole history on every call.
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut system_parts = Vec::new();
        let mut turns = Vec::new();

        for message in messages {
            match message.role {
                MessageRole::System => system_parts.push(message.content.as_str()),
                MessageRole::User | MessageRole::Assistant => turns.push(TranscriptTurn {
                    role: message.role,
                    content: message.content.clone(),
                }),
            }
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        Transcript { system, turns }
    }
}
