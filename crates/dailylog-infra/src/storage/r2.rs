//! Cloudflare R2 object storage via the S3-compatible API.
//!
//! Requests are signed with AWS Signature Version 4 (region `auto`,
//! service `s3`) using `hmac`/`sha2` directly rather than pulling in an
//! S3 SDK for two request types.

use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use dailylog_core::provider::ObjectStorage;
use dailylog_types::error::ProviderError;

use super::strip_public_base;

type HmacSha256 = Hmac<Sha256>;

const REGION: &str = "auto";
const SERVICE: &str = "s3";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// R2-backed object storage.
///
/// # Credential Security
///
/// The secret access key is stored as a [`SecretString`] and only exposed
/// while deriving the signing key. No Debug derive.
pub struct R2ObjectStorage {
    client: reqwest::Client,
    endpoint: String,
    host: String,
    bucket: String,
    access_key_id: String,
    secret_access_key: SecretString,
    public_base_url: String,
}

impl R2ObjectStorage {
    pub fn new(
        account_id: String,
        bucket: String,
        access_key_id: String,
        secret_access_key: SecretString,
        public_base_url: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");
        let host = format!("{account_id}.r2.cloudflarestorage.com");

        Self {
            client,
            endpoint: format!("https://{host}"),
            host,
            bucket,
            access_key_id,
            secret_access_key,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn signed_request(
        &self,
        method: reqwest::Method,
        key: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, ProviderError> {
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();
        let payload_hash = hex(&Sha256::digest(&body));
        let uri = format!("/{}/{key}", self.bucket);

        let canonical_request = canonical_request(
            method.as_str(),
            &uri,
            &self.host,
            &payload_hash,
            &amz_date,
        );
        let string_to_sign = string_to_sign(&amz_date, &date_stamp, &canonical_request);
        let signature = self.sign(&date_stamp, &string_to_sign)?;

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{date_stamp}/{REGION}/{SERVICE}/aws4_request, \
             SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.access_key_id
        );

        self.client
            .request(method, format!("{}{uri}", self.endpoint))
            .header("authorization", authorization)
            .header("x-amz-content-sha256", payload_hash)
            .header("x-amz-date", amz_date)
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))
    }

    fn sign(&self, date_stamp: &str, string_to_sign: &str) -> Result<String, ProviderError> {
        let secret = format!("AWS4{}", self.secret_access_key.expose_secret());
        let k_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes())?;
        let k_region = hmac_sha256(&k_date, REGION.as_bytes())?;
        let k_service = hmac_sha256(&k_region, SERVICE.as_bytes())?;
        let k_signing = hmac_sha256(&k_service, b"aws4_request")?;
        Ok(hex(&hmac_sha256(&k_signing, string_to_sign.as_bytes())?))
    }
}

impl ObjectStorage for R2ObjectStorage {
    async fn upload(&self, data: &[u8], key: &str) -> Result<String, ProviderError> {
        let response = self
            .signed_request(reqwest::Method::PUT, key, data.to_vec())
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Storage(format!(
                "R2 PUT returned {status}: {body}"
            )));
        }

        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, key_or_url: &str) -> Result<(), ProviderError> {
        let key = strip_public_base(key_or_url, &self.public_base_url);
        let response = self
            .signed_request(reqwest::Method::DELETE, key, Vec::new())
            .await?;

        let status = response.status();
        // 404 on delete means the object is already gone.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Storage(format!(
                "R2 DELETE returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

fn canonical_request(
    method: &str,
    uri: &str,
    host: &str,
    payload_hash: &str,
    amz_date: &str,
) -> String {
    format!(
        "{method}\n{uri}\n\nhost:{host}\nx-amz-content-sha256:{payload_hash}\nx-amz-date:{amz_date}\n\n{SIGNED_HEADERS}\n{payload_hash}"
    )
}

fn string_to_sign(amz_date: &str, date_stamp: &str, canonical_request: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{date_stamp}/{REGION}/{SERVICE}/aws4_request\n{}",
        hex(&Sha256::digest(canonical_request.as_bytes()))
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProviderError::Storage(format!("hmac key error: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
