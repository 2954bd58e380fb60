//! ObjectStorage trait definition.

use dailylog_types::error::ProviderError;

/// Trait for durable object storage of generated images.
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key`; returns the permanent public URL.
    fn upload(
        &self,
        data: &[u8],
        key: &str,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;

    /// Delete an object, addressed by storage key or by its public URL.
    fn delete(
        &self,
        key_or_url: &str,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}
