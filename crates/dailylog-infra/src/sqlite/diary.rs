//! SQLite diary repository implementation.
//!
//! Listing is cursor-paginated on the diary id: v7 ids sort by creation
//! time, so `id DESC` is newest-first and `id < cursor` resumes past the
//! last page. Next/prev navigation orders on `(writed_at, id)`.

use chrono::NaiveDate;
use dailylog_core::repository::DiaryRepository;
use dailylog_types::diary::Diary;
use dailylog_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_date, format_datetime, parse_date, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `DiaryRepository`.
pub struct SqliteDiaryRepository {
    pool: DatabasePool,
}

impl SqliteDiaryRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Diary.
struct DiaryRow {
    id: String,
    user_id: String,
    chat_session_id: Option<String>,
    title: Option<String>,
    content: String,
    writed_at: String,
    thumbnail_url: Option<String>,
    user_authored: i64,
    created_at: String,
    updated_at: String,
}

impl DiaryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            chat_session_id: row.try_get("chat_session_id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            writed_at: row.try_get("writed_at")?,
            thumbnail_url: row.try_get("thumbnail_url")?,
            user_authored: row.try_get("user_authored")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_diary(self) -> Result<Diary, RepositoryError> {
        let chat_session_id = self
            .chat_session_id
            .as_deref()
            .map(|s| parse_uuid(s, "chat_session_id"))
            .transpose()?;

        Ok(Diary {
            id: parse_uuid(&self.id, "diary id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            chat_session_id,
            title: self.title,
            content: self.content,
            writed_at: parse_date(&self.writed_at)?,
            thumbnail_url: self.thumbnail_url,
            user_authored: self.user_authored != 0,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn rows_to_diaries(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Diary>, RepositoryError> {
    let mut diaries = Vec::with_capacity(rows.len());
    for row in rows {
        let diary_row =
            DiaryRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        diaries.push(diary_row.into_diary()?);
    }
    Ok(diaries)
}

impl DiaryRepository for SqliteDiaryRepository {
    async fn create(&self, diary: &Diary) -> Result<Diary, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO diaries (id, user_id, chat_session_id, title, content, writed_at, thumbnail_url, user_authored, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(diary.id.to_string())
        .bind(diary.user_id.to_string())
        .bind(diary.chat_session_id.map(|id| id.to_string()))
        .bind(&diary.title)
        .bind(&diary.content)
        .bind(format_date(&diary.writed_at))
        .bind(&diary.thumbnail_url)
        .bind(diary.user_authored as i64)
        .bind(format_datetime(&diary.created_at))
        .bind(format_datetime(&diary.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(diary.clone())
    }

    async fn find_by_id(&self, diary_id: &Uuid) -> Result<Option<Diary>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM diaries WHERE id = ?")
            .bind(diary_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let diary_row =
                    DiaryRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(diary_row.into_diary()?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_date(
        &self,
        writed_at: NaiveDate,
        user_id: &Uuid,
    ) -> Result<Option<Diary>, RepositoryError> {
        let row = sqlx::query(
            "SELECT * FROM diaries WHERE user_id = ? AND writed_at = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(format_date(&writed_at))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let diary_row =
                    DiaryRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(diary_row.into_diary()?))
            }
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> Result<Vec<Diary>, RepositoryError> {
        let rows = match cursor {
            Some(cursor) => {
                sqlx::query(
                    "SELECT * FROM diaries WHERE user_id = ? AND id < ? ORDER BY id DESC LIMIT ?",
                )
                .bind(user_id.to_string())
                .bind(cursor.to_string())
                .bind(size)
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM diaries WHERE user_id = ? ORDER BY id DESC LIMIT ?")
                    .bind(user_id.to_string())
                    .bind(size)
                    .fetch_all(&self.pool.reader)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_diaries(&rows)
    }

    async fn find_next(&self, diary: &Diary) -> Result<Option<Diary>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM diaries
               WHERE user_id = ? AND (writed_at > ? OR (writed_at = ? AND id > ?))
               ORDER BY writed_at ASC, id ASC LIMIT 1"#,
        )
        .bind(diary.user_id.to_string())
        .bind(format_date(&diary.writed_at))
        .bind(format_date(&diary.writed_at))
        .bind(diary.id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let diary_row =
                    DiaryRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(diary_row.into_diary()?))
            }
            None => Ok(None),
        }
    }

    async fn find_prev(&self, diary: &Diary) -> Result<Option<Diary>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM diaries
               WHERE user_id = ? AND (writed_at < ? OR (writed_at = ? AND id < ?))
               ORDER BY writed_at DESC, id DESC LIMIT 1"#,
        )
        .bind(diary.user_id.to_string())
        .bind(format_date(&diary.writed_at))
        .bind(format_date(&diary.writed_at))
        .bind(diary.id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let diary_row =
                    DiaryRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(diary_row.into_diary()?))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, diary: &Diary) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE diaries
               SET title = ?, content = ?, writed_at = ?, thumbnail_url = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&diary.title)
        .bind(&diary.content)
        .bind(format_date(&diary.writed_at))
        .bind(&diary.thumbnail_url)
        .bind(format_datetime(&diary.updated_at))
        .bind(diary.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, diary_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM diaries WHERE id = ?")
            .bind(diary_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::{seed_user, test_pool};

    fn diary_for(user_id: Uuid, content: &str) -> Diary {
        Diary::new(user_id, None, None, content.to_string(), true)
    }

    #[tokio::test]
    async fn test_create_and_find_roundtrip() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let mut diary = diary_for(user.id, "A quiet day with a long walk at dusk.");
        diary.title = Some("Dusk".to_string());
        repo.create(&diary).await.unwrap();

        let found = repo.find_by_id(&diary.id).await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("Dusk"));
        assert_eq!(found.content, diary.content);
        assert_eq!(found.writed_at, diary.writed_at);
        assert!(found.user_authored);
        assert!(found.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_cursor() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let mut ids = Vec::new();
        for i in 0..5 {
            let diary = diary_for(user.id, &format!("Entry number {i} with enough text."));
            repo.create(&diary).await.unwrap();
            ids.push(diary.id);
        }

        let page = repo.list(&user.id, None, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, ids[4]);
        assert_eq!(page[1].id, ids[3]);

        let next = repo.list(&user.id, Some(page[1].id), 2).await.unwrap();
        assert_eq!(next[0].id, ids[2]);
        assert_eq!(next[1].id, ids[1]);
    }

    #[tokio::test]
    async fn test_find_by_date_latest_entry_wins() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let first = diary_for(user.id, "Morning thoughts, before anything happened.");
        let second = diary_for(user.id, "Evening rewrite of the whole day.");
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let found = repo
            .find_by_date(second.writed_at, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn test_next_prev_order_by_date_then_id() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let mut a = diary_for(user.id, "The earliest entry of the three.");
        let mut b = diary_for(user.id, "The middle entry of the three.");
        let mut c = diary_for(user.id, "The latest entry of the three.");
        a.writed_at = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        b.writed_at = NaiveDate::from_ymd_opt(2026, 8, 2).unwrap();
        c.writed_at = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        for diary in [&a, &b, &c] {
            repo.create(diary).await.unwrap();
        }

        let next = repo.find_next(&b).await.unwrap().unwrap();
        let prev = repo.find_prev(&b).await.unwrap().unwrap();
        assert_eq!(next.id, c.id);
        assert_eq!(prev.id, a.id);

        assert!(repo.find_next(&c).await.unwrap().is_none());
        assert!(repo.find_prev(&a).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_persists_thumbnail_url() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let mut diary = diary_for(user.id, "An entry that will get a thumbnail.");
        repo.create(&diary).await.unwrap();

        diary.thumbnail_url = Some("https://cdn.example/thumbnails/x.png".to_string());
        repo.update(&diary).await.unwrap();

        let found = repo.find_by_id(&diary.id).await.unwrap().unwrap();
        assert_eq!(found.thumbnail_url, diary.thumbnail_url);
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let (pool, _dir) = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SqliteDiaryRepository::new(pool);

        let diary = diary_for(user.id, "Short-lived entry, deleted right away.");
        repo.create(&diary).await.unwrap();
        repo.delete(&diary.id).await.unwrap();

        assert!(repo.find_by_id(&diary.id).await.unwrap().is_none());
        let err = repo.delete(&diary.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
