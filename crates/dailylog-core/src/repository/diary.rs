//! DiaryRepository trait definition.

use chrono::NaiveDate;
use dailylog_types::diary::Diary;
use dailylog_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for diary persistence.
pub trait DiaryRepository: Send + Sync {
    /// Persist a new diary entry.
    fn create(
        &self,
        diary: &Diary,
    ) -> impl std::future::Future<Output = Result<Diary, RepositoryError>> + Send;

    /// A diary by id.
    fn find_by_id(
        &self,
        diary_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Diary>, RepositoryError>> + Send;

    /// A user's diary for a given day; the latest entry wins if several
    /// share the date.
    fn find_by_date(
        &self,
        writed_at: NaiveDate,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Diary>, RepositoryError>> + Send;

    /// A user's diaries, newest first, with id-cursor pagination.
    fn list(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Diary>, RepositoryError>> + Send;

    /// The chronologically next diary after `diary` for the same user.
    fn find_next(
        &self,
        diary: &Diary,
    ) -> impl std::future::Future<Output = Result<Option<Diary>, RepositoryError>> + Send;

    /// The chronologically previous diary before `diary` for the same user.
    fn find_prev(
        &self,
        diary: &Diary,
    ) -> impl std::future::Future<Output = Result<Option<Diary>, RepositoryError>> + Send;

    /// Update an existing diary (title, content, thumbnail URL).
    fn update(
        &self,
        diary: &Diary,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a diary by id.
    fn delete(
        &self,
        diary_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
