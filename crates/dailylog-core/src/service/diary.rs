//! Diary composition service.
//!
//! The top-level facade for turning conversations into diaries, plus the
//! read/edit operations on existing entries. The finalize sequence (create
//! diary, end session, apply entitlement) runs step by step with no
//! surrounding transaction; a crash between steps leaves a partial state
//! that the caller repairs by re-invoking.

use chrono::{NaiveDate, Utc};
use dailylog_types::chat::ChatSession;
use dailylog_types::diary::{Diary, MIN_CONTENT_LEN};
use dailylog_types::error::{ChatError, DiaryError};
use dailylog_types::user::User;
use tracing::info;
use uuid::Uuid;

use crate::extract::extract;
use crate::repository::{ChatRepository, DiaryRepository, PaymentRepository, UserRepository};
use crate::service::entitlement::EntitlementService;

/// Neighbouring diaries around one entry, for calendar navigation.
#[derive(Debug, Clone)]
pub struct NextPrevDiaries {
    pub next: Option<Diary>,
    pub prev: Option<Diary>,
}

pub struct DiaryService<C, D, P, U>
where
    C: ChatRepository,
    D: DiaryRepository,
    P: PaymentRepository,
    U: UserRepository,
{
    chat_repo: C,
    diary_repo: D,
    entitlement: EntitlementService<P, U>,
}

impl<C, D, P, U> DiaryService<C, D, P, U>
where
    C: ChatRepository,
    D: DiaryRepository,
    P: PaymentRepository,
    U: UserRepository,
{
    pub fn new(chat_repo: C, diary_repo: D, entitlement: EntitlementService<P, U>) -> Self {
        Self {
            chat_repo,
            diary_repo,
            entitlement,
        }
    }

    /// Turn a chosen assistant reply into a persisted diary.
    ///
    /// Extracts title/content from the message, validates the content
    /// length, creates the diary, ends the session, then applies the
    /// entitlement gate.
    pub async fn finalize(&self, session_id: &Uuid, message_id: &Uuid) -> Result<Diary, DiaryError> {
        let session = self
            .chat_repo
            .find_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        let message = self
            .chat_repo
            .find_message(session_id, message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        let extracted = extract(&message.content);
        validate_content(&extracted.content)?;

        let diary = Diary::new(
            session.user_id,
            Some(session.id),
            extracted.title,
            extracted.content,
            false,
        );
        let diary = self.diary_repo.create(&diary).await?;

        self.chat_repo.end_session(session_id).await?;
        self.entitlement.apply_after_write(&session.user_id).await?;

        info!(diary_id = %diary.id, session_id = %session_id, "Diary finalized from conversation");
        Ok(diary)
    }

    /// Persist a diary the user wrote directly, bypassing the conversation.
    pub async fn write_direct(
        &self,
        user: &User,
        title: Option<String>,
        content: String,
    ) -> Result<Diary, DiaryError> {
        validate_content(&content)?;

        let diary = Diary::new(user.id, None, title, content, true);
        let diary = self.diary_repo.create(&diary).await?;
        self.entitlement.apply_after_write(&user.id).await?;

        info!(diary_id = %diary.id, user_id = %user.id, "Diary written directly");
        Ok(diary)
    }

    pub async fn get_by_id(&self, diary_id: &Uuid) -> Result<Diary, DiaryError> {
        self.diary_repo
            .find_by_id(diary_id)
            .await?
            .ok_or(DiaryError::NotFound)
    }

    pub async fn get_by_date(
        &self,
        writed_at: NaiveDate,
        user_id: &Uuid,
    ) -> Result<Diary, DiaryError> {
        self.diary_repo
            .find_by_date(writed_at, user_id)
            .await?
            .ok_or(DiaryError::NotFound)
    }

    /// A user's diaries, newest first, with cursor pagination.
    pub async fn list(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> Result<Vec<Diary>, DiaryError> {
        Ok(self.diary_repo.list(user_id, cursor, size).await?)
    }

    /// Chronological neighbours of a diary for calendar navigation.
    pub async fn find_next_prev(&self, diary_id: &Uuid) -> Result<NextPrevDiaries, DiaryError> {
        let diary = self.get_by_id(diary_id).await?;
        let next = self.diary_repo.find_next(&diary).await?;
        let prev = self.diary_repo.find_prev(&diary).await?;
        Ok(NextPrevDiaries { next, prev })
    }

    /// Edit a diary's title and content.
    pub async fn update(
        &self,
        diary_id: &Uuid,
        title: Option<String>,
        content: String,
    ) -> Result<Diary, DiaryError> {
        validate_content(&content)?;

        let mut diary = self.get_by_id(diary_id).await?;
        diary.title = title;
        diary.content = content;
        diary.updated_at = Utc::now();
        self.diary_repo.update(&diary).await?;
        Ok(diary)
    }

    pub async fn delete(&self, diary_id: &Uuid) -> Result<(), DiaryError> {
        self.get_by_id(diary_id).await?;
        Ok(self.diary_repo.delete(diary_id).await?)
    }

    /// The conversation a diary was composed from.
    pub async fn session_of(&self, diary_id: &Uuid) -> Result<ChatSession, DiaryError> {
        let diary = self.get_by_id(diary_id).await?;
        let session_id = diary
            .chat_session_id
            .ok_or(ChatError::SessionNotFound)?;
        Ok(self
            .chat_repo
            .find_session(&session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?)
    }
}

fn validate_content(content: &str) -> Result<(), DiaryError> {
    let length = content.chars().count();
    if length < MIN_CONTENT_LEN {
        return Err(DiaryError::ContentTooShort {
            length,
            minimum: MIN_CONTENT_LEN,
        });
    }
    Ok(())
}
