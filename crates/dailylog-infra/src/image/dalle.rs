//! DALL-E image generation via the OpenAI images API.
//!
//! Plain reqwest against `/v1/images/generations`; the returned URL is
//! transient on OpenAI's side and must be copied into durable storage
//! before it expires.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use dailylog_core::provider::ImageGenerator;
use dailylog_observe::genai_attrs;
use dailylog_types::error::ProviderError;

/// DALL-E image generator.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. No Debug derive.
pub struct DalleImageGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

impl DalleImageGenerator {
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120)) // image generation is slow
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl ImageGenerator for DalleImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let span = tracing::info_span!(
            "generate_image",
            gen_ai.operation.name = genai_attrs::OP_GENERATE_IMAGE,
            gen_ai.provider.name = "openai",
            gen_ai.request.model = %self.model,
        );

        let request = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: "1024x1024",
            quality: "standard",
            response_format: "url",
        };

        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .instrument(span)
            .await
            .map_err(|e| ProviderError::ImageGeneration(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ImageGeneration(format!(
                "images API returned {status}: {body}"
            )));
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ImageGeneration(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| ProviderError::ImageGeneration("no image url in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_serializes_expected_shape() {
        let request = ImageRequest {
            model: "dall-e-3",
            prompt: "a watercolor of a quiet evening",
            n: 1,
            size: "1024x1024",
            quality: "standard",
            response_format: "url",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["response_format"], "url");
    }

    #[test]
    fn test_image_response_parses_url() {
        let parsed: ImageResponse = serde_json::from_str(
            r#"{"created": 1700000000, "data": [{"url": "https://images.example/t/1"}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.data[0].url.as_deref(),
            Some("https://images.example/t/1")
        );
    }
}
