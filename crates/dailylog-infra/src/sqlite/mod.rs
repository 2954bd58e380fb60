//! SQLite persistence layer.
//!
//! One repository type per aggregate, all backed by the shared
//! [`DatabasePool`] with split reader/writer connections. Rows map to
//! domain types through private Row structs; dates and timestamps are
//! stored as TEXT (RFC 3339 for timestamps, ISO 8601 for dates).

pub mod chat;
pub mod diary;
pub mod payment;
pub mod pool;
pub mod user;

pub use chat::SqliteChatRepository;
pub use diary::SqliteDiaryRepository;
pub use payment::SqlitePaymentRepository;
pub use pool::DatabasePool;
pub use user::SqliteUserRepository;

use chrono::{DateTime, NaiveDate, Utc};
use dailylog_types::error::RepositoryError;
use uuid::Uuid;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    s.parse()
        .map_err(|e| RepositoryError::Query(format!("invalid date: {e}")))
}

pub(crate) fn format_date(date: &NaiveDate) -> String {
    date.to_string()
}

pub(crate) fn parse_uuid(s: &str, field: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::Query(format!("invalid {field}: {e}")))
}

#[cfg(test)]
pub(crate) mod test_support {
    use dailylog_types::user::User;

    use super::pool::DatabasePool;
    use super::user::SqliteUserRepository;
    use dailylog_core::repository::UserRepository;

    /// Fresh pool backed by a tempdir database; the dir guard must be kept
    /// alive for the duration of the test.
    pub async fn test_pool() -> (DatabasePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (pool, dir)
    }

    /// Insert a user row so foreign keys on dependent tables are satisfied.
    pub async fn seed_user(pool: &DatabasePool) -> User {
        let repo = SqliteUserRepository::new(pool.clone());
        repo.create(&User::new(Some("dana".to_string())))
            .await
            .unwrap()
    }
}
