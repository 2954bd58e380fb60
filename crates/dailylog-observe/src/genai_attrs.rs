//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! These follow the OTel GenAI Semantic Conventions specification for
//! consistent AI call instrumentation across the codebase. All constants
//! are string slices usable in `tracing::span!` and `tracing::info_span!`
//! field names.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat gpt-4o"`)

// --- Required attributes ---

/// The name of the operation being performed (e.g., "chat", "generate_image").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "openai").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested (e.g., "gpt-4o", "dall-e-3").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The unique response/message ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

// --- Operation name values ---

/// Standard chat completion operation (the diary conversation relay).
pub const OP_CHAT: &str = "chat";

/// Thumbnail image generation operation.
pub const OP_GENERATE_IMAGE: &str = "generate_image";
