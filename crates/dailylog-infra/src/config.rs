//! Process configuration loaded from the environment.
//!
//! Secrets (the OpenAI API key, R2 credentials) stay wrapped in
//! [`SecretString`] from the moment they are read so they never appear in
//! Debug output or tracing logs.

use std::path::PathBuf;

use secrecy::SecretString;

/// Default chat model when `DAILYLOG_CHAT_MODEL` is unset.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Default image model when `DAILYLOG_IMAGE_MODEL` is unset.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Which object storage backend to wire up.
pub enum StorageConfig {
    /// Local filesystem storage, for development and tests.
    Filesystem {
        root: PathBuf,
        public_base_url: String,
    },
    /// Cloudflare R2 via its S3-compatible API.
    R2 {
        account_id: String,
        bucket: String,
        access_key_id: String,
        secret_access_key: SecretString,
        public_base_url: String,
    },
}

/// Everything the infrastructure layer needs to construct its backends.
pub struct InfraConfig {
    pub openai_api_key: SecretString,
    pub chat_model: String,
    pub image_model: String,
    pub storage: StorageConfig,
}

impl InfraConfig {
    /// Load configuration from the process environment.
    ///
    /// `DAILYLOG_OPENAI_API_KEY` is always required. Storage defaults to
    /// the filesystem backend under the data directory; setting
    /// `DAILYLOG_STORAGE=r2` switches to R2 and requires the R2 variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = require("DAILYLOG_OPENAI_API_KEY")?.into();
        let chat_model =
            std::env::var("DAILYLOG_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let image_model = std::env::var("DAILYLOG_IMAGE_MODEL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let backend = std::env::var("DAILYLOG_STORAGE").unwrap_or_else(|_| "filesystem".to_string());
        let storage = match backend.as_str() {
            "filesystem" => StorageConfig::Filesystem {
                root: std::env::var("DAILYLOG_STORAGE_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| data_dir().join("storage")),
                public_base_url: std::env::var("DAILYLOG_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/static".to_string()),
            },
            "r2" => StorageConfig::R2 {
                account_id: require("DAILYLOG_R2_ACCOUNT_ID")?,
                bucket: require("DAILYLOG_R2_BUCKET")?,
                access_key_id: require("DAILYLOG_R2_ACCESS_KEY_ID")?,
                secret_access_key: require("DAILYLOG_R2_SECRET_ACCESS_KEY")?.into(),
                public_base_url: require("DAILYLOG_R2_PUBLIC_BASE_URL")?,
            },
            other => {
                return Err(ConfigError::InvalidVar {
                    var: "DAILYLOG_STORAGE",
                    reason: format!("unknown backend '{other}', expected 'filesystem' or 'r2'"),
                });
            }
        };

        Ok(Self {
            openai_api_key,
            chat_model,
            image_model,
            storage,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

/// Resolve the data directory: `DAILYLOG_DATA_DIR`, falling back to
/// `~/.dailylog`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DAILYLOG_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dailylog")
}
