//! SQLite user repository implementation.

use dailylog_core::repository::UserRepository;
use dailylog_types::error::RepositoryError;
use dailylog_types::user::{Gender, User};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_date, format_datetime, parse_date, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: String,
    username: Option<String>,
    birth: Option<String>,
    gender: Option<String>,
    free_trial_count: i64,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            birth: row.try_get("birth")?,
            gender: row.try_get("gender")?,
            free_trial_count: row.try_get("free_trial_count")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = parse_uuid(&self.id, "user id")?;
        let birth = self.birth.as_deref().map(parse_date).transpose()?;
        let gender: Option<Gender> = self
            .gender
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(RepositoryError::Query)?;

        Ok(User {
            id,
            username: self.username,
            birth,
            gender,
            free_trial_count: self.free_trial_count,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO users (id, username, birth, gender, free_trial_count, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(user.birth.as_ref().map(format_date))
        .bind(user.gender.map(|g| g.to_string()))
        .bind(user.free_trial_count)
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(user.clone())
    }

    async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE users
               SET username = ?, birth = ?, gender = ?, free_trial_count = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&user.username)
        .bind(user.birth.as_ref().map(format_date))
        .bind(user.gender.map(|g| g.to_string()))
        .bind(user.free_trial_count)
        .bind(format_datetime(&user.updated_at))
        .bind(user.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
