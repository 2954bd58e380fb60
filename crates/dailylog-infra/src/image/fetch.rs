//! HTTP image fetcher.

use std::time::Duration;

use dailylog_core::provider::ImageFetcher;
use dailylog_types::error::ProviderError;

/// Downloads image bytes from a (typically transient) provider URL.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");
        Self { client }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Fetch(format!(
                "image fetch returned {status} for {url}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
