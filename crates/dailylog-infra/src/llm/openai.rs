//! OpenAI-backed [`ConversationProvider`].
//!
//! Uses [`async_openai`] for type-safe request/response handling. The
//! stored session transcript is flattened through
//! [`dailylog_core::transcript::Transcript`] into one system message plus
//! the user/assistant turns in order.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use dailylog_core::provider::ConversationProvider;
use dailylog_observe::genai_attrs;
use dailylog_core::transcript::Transcript;
use dailylog_types::chat::{ChatMessage, ChatSession, MessageRole};
use dailylog_types::error::ProviderError;

/// OpenAI chat-completions conversation provider.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiConversationProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiConversationProvider {
    /// Create a provider for the given model against the default OpenAI
    /// base URL.
    pub fn new(api_key: &SecretString, model: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// Create a provider against a custom base URL (testing, proxies).
    pub fn with_base_url(api_key: &SecretString, model: &str, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a session transcript.
    fn build_request(&self, session: &ChatSession) -> CreateChatCompletionRequest {
        let transcript = Transcript::from_messages(&session.messages);
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system) = transcript.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system),
                    name: None,
                },
            ));
        }

        for turn in transcript.turns {
            let oai_msg = match turn.role {
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(turn.content),
                        name: None,
                    })
                }
                _ => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            turn.content,
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            };
            messages.push(oai_msg);
        }

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            ..Default::default()
        }
    }
}

impl ConversationProvider for OpenAiConversationProvider {
    async fn send(&self, session: &ChatSession) -> Result<ChatMessage, ProviderError> {
        let span = tracing::info_span!(
            "chat",
            gen_ai.operation.name = genai_attrs::OP_CHAT,
            gen_ai.provider.name = "openai",
            gen_ai.request.model = %self.model,
            gen_ai.response.id = tracing::field::Empty,
        );

        let request = self.build_request(session);

        let response = self
            .client
            .chat()
            .create(request)
            .instrument(span.clone())
            .await
            .map_err(|e| ProviderError::Conversation(e.to_string()))?;

        span.record(genai_attrs::GEN_AI_RESPONSE_ID, response.id.as_str());

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderError::Conversation("empty completion".to_string()))?;

        Ok(ChatMessage::new(
            session.user_id,
            MessageRole::Assistant,
            content,
        ))
    }
}
