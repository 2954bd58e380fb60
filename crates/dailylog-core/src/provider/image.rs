//! Image generation and retrieval trait definitions.

use dailylog_types::error::ProviderError;

/// Trait for the image-generation backend.
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for `prompt`; returns the provider's (typically
    /// transient) image URL.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;
}

/// Trait for fetching raw image bytes from a URL.
///
/// Generation-provider URLs are short-lived, so the fetch happens as soon
/// as the user confirms a thumbnail. Retrieval failures propagate; there
/// is no retry.
pub trait ImageFetcher: Send + Sync {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}
