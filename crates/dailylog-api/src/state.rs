//! Application state wiring all services together.
//!
//! Services are generic over repository/provider traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use dailylog_core::service::conversation::ConversationService;
use dailylog_core::service::diary::DiaryService;
use dailylog_core::service::entitlement::EntitlementService;
use dailylog_core::service::session::SessionService;
use dailylog_core::service::thumbnail::ThumbnailService;
use dailylog_infra::config::{self, InfraConfig, StorageConfig};
use dailylog_infra::image::{DalleImageGenerator, HttpImageFetcher};
use dailylog_infra::llm::OpenAiConversationProvider;
use dailylog_infra::sqlite::{
    DatabasePool, SqliteChatRepository, SqliteDiaryRepository, SqlitePaymentRepository,
    SqliteUserRepository,
};
use dailylog_infra::storage::ObjectStorageBackend;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteChatRepository, SqliteDiaryRepository>;

pub type ConcreteConversationService =
    ConversationService<SqliteChatRepository, OpenAiConversationProvider>;

pub type ConcreteDiaryService = DiaryService<
    SqliteChatRepository,
    SqliteDiaryRepository,
    SqlitePaymentRepository,
    SqliteUserRepository,
>;

pub type ConcreteThumbnailService = ThumbnailService<
    SqliteDiaryRepository,
    DalleImageGenerator,
    HttpImageFetcher,
    ObjectStorageBackend,
>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub conversation_service: Arc<ConcreteConversationService>,
    pub diary_service: Arc<ConcreteDiaryService>,
    pub thumbnail_service: Arc<ConcreteThumbnailService>,
    pub user_repo: Arc<SqliteUserRepository>,
    pub data_dir: PathBuf,
    /// Root directory served at `/static` when the filesystem storage
    /// backend is active.
    pub static_dir: Option<PathBuf>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = config::data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("dailylog.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let infra = InfraConfig::from_env()?;

        let static_dir = match &infra.storage {
            StorageConfig::Filesystem { root, .. } => Some(root.clone()),
            StorageConfig::R2 { .. } => None,
        };

        let session_service = SessionService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteDiaryRepository::new(db_pool.clone()),
        );

        let conversation_service = ConversationService::new(
            SqliteChatRepository::new(db_pool.clone()),
            OpenAiConversationProvider::new(&infra.openai_api_key, &infra.chat_model),
        );

        let entitlement = EntitlementService::new(
            SqlitePaymentRepository::new(db_pool.clone()),
            SqliteUserRepository::new(db_pool.clone()),
        );
        let diary_service = DiaryService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteDiaryRepository::new(db_pool.clone()),
            entitlement,
        );

        let thumbnail_service = ThumbnailService::new(
            SqliteDiaryRepository::new(db_pool.clone()),
            DalleImageGenerator::new(infra.openai_api_key.clone(), infra.image_model.clone()),
            HttpImageFetcher::new(),
            ObjectStorageBackend::from_config(infra.storage),
        );

        Ok(Self {
            session_service: Arc::new(session_service),
            conversation_service: Arc::new(conversation_service),
            diary_service: Arc::new(diary_service),
            thumbnail_service: Arc::new(thumbnail_service),
            user_repo: Arc::new(SqliteUserRepository::new(db_pool.clone())),
            data_dir,
            static_dir,
            db_pool,
        })
    }
}
