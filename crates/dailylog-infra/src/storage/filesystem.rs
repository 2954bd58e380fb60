//! Filesystem object storage for development and tests.

use std::path::PathBuf;

use dailylog_core::provider::ObjectStorage;
use dailylog_types::error::ProviderError;

use super::strip_public_base;

/// Stores objects as files under a root directory and serves them from a
/// static file route.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, data: &[u8], key: &str) -> Result<String, ProviderError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProviderError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))?;

        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, key_or_url: &str) -> Result<(), ProviderError> {
        let key = strip_public_base(key_or_url, &self.public_base_url);
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            // Deleting an already-deleted object is a no-op.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ProviderError::Storage(e.to_string())),
        }
    }
}
