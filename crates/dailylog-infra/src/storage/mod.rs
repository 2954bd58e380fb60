//! Durable object storage for generated thumbnails.
//!
//! Two backends behind one enum: local filesystem for development and
//! tests, Cloudflare R2 (S3-compatible API) for production. The backend
//! is chosen once at wiring time from [`crate::config::StorageConfig`].

pub mod filesystem;
pub mod r2;

pub use filesystem::LocalObjectStorage;
pub use r2::R2ObjectStorage;

use dailylog_core::provider::ObjectStorage;
use dailylog_types::error::ProviderError;

use crate::config::StorageConfig;

/// The concrete storage backend selected at startup.
pub enum ObjectStorageBackend {
    Filesystem(LocalObjectStorage),
    R2(R2ObjectStorage),
}

impl ObjectStorageBackend {
    pub fn from_config(config: StorageConfig) -> Self {
        match config {
            StorageConfig::Filesystem {
                root,
                public_base_url,
            } => Self::Filesystem(LocalObjectStorage::new(root, public_base_url)),
            StorageConfig::R2 {
                account_id,
                bucket,
                access_key_id,
                secret_access_key,
                public_base_url,
            } => Self::R2(R2ObjectStorage::new(
                account_id,
                bucket,
                access_key_id,
                secret_access_key,
                public_base_url,
            )),
        }
    }
}

impl ObjectStorage for ObjectStorageBackend {
    async fn upload(&self, data: &[u8], key: &str) -> Result<String, ProviderError> {
        match self {
            Self::Filesystem(fs) => fs.upload(data, key).await,
            Self::R2(r2) => r2.upload(data, key).await,
        }
    }

    async fn delete(&self, key_or_url: &str) -> Result<(), ProviderError> {
        match self {
            Self::Filesystem(fs) => fs.delete(key_or_url).await,
            Self::R2(r2) => r2.delete(key_or_url).await,
        }
    }
}

/// Reduce a key-or-public-URL argument to a bare storage key.
pub(crate) fn strip_public_base<'a>(key_or_url: &'a str, public_base_url: &str) -> &'a str {
    key_or_url
        .strip_prefix(public_base_url)
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(key_or_url)
}
