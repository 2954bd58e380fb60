//! In-memory fakes for service-level tests.
//!
//! Each fake implements the corresponding port with a `Mutex`-guarded map;
//! clones share state so tests can inspect what a service persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use dailylog_types::chat::{ChatMessage, ChatSession};
use dailylog_types::diary::Diary;
use dailylog_types::error::{ProviderError, RepositoryError};
use dailylog_types::payment::PaymentRecord;
use dailylog_types::user::User;
use uuid::Uuid;

use crate::provider::{ConversationProvider, ImageFetcher, ImageGenerator, ObjectStorage};
use crate::repository::{ChatRepository, DiaryRepository, PaymentRepository, UserRepository};

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InMemoryChatRepository {
    sessions: Arc<Mutex<HashMap<Uuid, ChatSession>>>,
}

impl InMemoryChatRepository {
    /// Seed a session without going through the trait (test setup).
    pub async fn create_session_direct(&self, session: &ChatSession) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
    }

    /// Current stored state of a session; panics when absent.
    pub async fn snapshot(&self, session_id: &Uuid) -> ChatSession {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .expect("session not stored")
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        if session.active
            && sessions
                .values()
                .any(|s| s.user_id == session.user_id && s.active)
        {
            return Err(RepositoryError::Conflict(
                "active session already exists".to_string(),
            ));
        }
        sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn find_active_session(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .find(|s| s.user_id == *user_id && s.active)
            .cloned())
    }

    async fn find_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn find_message(
        &self,
        session_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(session_id)
            .and_then(|s| s.messages.iter().find(|m| m.id == *message_id))
            .cloned())
    }

    async fn add_message(
        &self,
        session_id: &Uuid,
        message: &ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.messages.push(message.clone());
        Ok(())
    }

    async fn end_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.active = false;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDiaryRepository {
    diaries: Arc<Mutex<HashMap<Uuid, Diary>>>,
}

impl InMemoryDiaryRepository {
    pub async fn insert(&self, diary: Diary) -> Diary {
        self.diaries.lock().unwrap().insert(diary.id, diary.clone());
        diary
    }

    pub async fn all(&self) -> Vec<Diary> {
        let mut all: Vec<Diary> = self.diaries.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|d| d.id);
        all
    }
}

impl DiaryRepository for InMemoryDiaryRepository {
    async fn create(&self, diary: &Diary) -> Result<Diary, RepositoryError> {
        self.diaries.lock().unwrap().insert(diary.id, diary.clone());
        Ok(diary.clone())
    }

    async fn find_by_id(&self, diary_id: &Uuid) -> Result<Option<Diary>, RepositoryError> {
        Ok(self.diaries.lock().unwrap().get(diary_id).cloned())
    }

    async fn find_by_date(
        &self,
        writed_at: NaiveDate,
        user_id: &Uuid,
    ) -> Result<Option<Diary>, RepositoryError> {
        Ok(self
            .diaries
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.user_id == *user_id && d.writed_at == writed_at)
            .max_by_key(|d| d.id)
            .cloned())
    }

    async fn list(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> Result<Vec<Diary>, RepositoryError> {
        let mut entries: Vec<Diary> = self
            .diaries
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.user_id == *user_id)
            .filter(|d| cursor.map(|c| d.id < c).unwrap_or(true))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries.truncate(size.max(0) as usize);
        Ok(entries)
    }

    async fn find_next(&self, diary: &Diary) -> Result<Option<Diary>, RepositoryError> {
        Ok(self
            .diaries
            .lock()
            .unwrap()
            .values()
            .filter(|d| {
                d.user_id == diary.user_id
                    && (d.writed_at, d.id) > (diary.writed_at, diary.id)
            })
            .min_by_key(|d| (d.writed_at, d.id))
            .cloned())
    }

    async fn find_prev(&self, diary: &Diary) -> Result<Option<Diary>, RepositoryError> {
        Ok(self
            .diaries
            .lock()
            .unwrap()
            .values()
            .filter(|d| {
                d.user_id == diary.user_id
                    && (d.writed_at, d.id) < (diary.writed_at, diary.id)
            })
            .max_by_key(|d| (d.writed_at, d.id))
            .cloned())
    }

    async fn update(&self, diary: &Diary) -> Result<(), RepositoryError> {
        let mut diaries = self.diaries.lock().unwrap();
        if !diaries.contains_key(&diary.id) {
            return Err(RepositoryError::NotFound);
        }
        diaries.insert(diary.id, diary.clone());
        Ok(())
    }

    async fn delete(&self, diary_id: &Uuid) -> Result<(), RepositoryError> {
        self.diaries
            .lock()
            .unwrap()
            .remove(diary_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    records: Arc<Mutex<Vec<PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    pub async fn insert(&self, record: PaymentRecord) {
        self.records.lock().unwrap().push(record);
    }
}

impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, record: &PaymentRecord) -> Result<(), RepositoryError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let mut records: Vec<PaymentRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .filter(|r| cursor.map(|c| r.id < c).unwrap_or(true))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(size.max(0) as usize);
        Ok(records)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub async fn insert(&self, user: User) -> User {
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub async fn get(&self, user_id: &Uuid) -> Option<User> {
        self.users.lock().unwrap().get(user_id).cloned()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// Returns a fixed reply and remembers how long the last transcript was.
#[derive(Clone)]
pub struct ScriptedConversationProvider {
    reply: String,
    last_seen_len: Arc<Mutex<usize>>,
}

impl ScriptedConversationProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            last_seen_len: Arc::new(Mutex::new(0)),
        }
    }

    pub fn last_seen_len(&self) -> usize {
        *self.last_seen_len.lock().unwrap()
    }
}

impl ConversationProvider for ScriptedConversationProvider {
    async fn send(&self, session: &ChatSession) -> Result<ChatMessage, ProviderError> {
        *self.last_seen_len.lock().unwrap() = session.messages.len();
        Ok(ChatMessage::new(
            session.user_id,
            dailylog_types::chat::MessageRole::Assistant,
            self.reply.clone(),
        ))
    }
}

#[derive(Clone, Default)]
pub struct FailingConversationProvider;

impl ConversationProvider for FailingConversationProvider {
    async fn send(&self, _session: &ChatSession) -> Result<ChatMessage, ProviderError> {
        Err(ProviderError::Conversation("simulated outage".to_string()))
    }
}

#[derive(Clone)]
pub struct FakeImageGenerator {
    url: String,
}

impl FakeImageGenerator {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.url.clone())
    }
}

#[derive(Clone)]
pub struct FakeImageFetcher {
    data: Vec<u8>,
}

impl FakeImageFetcher {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl ImageFetcher for FakeImageFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(self.data.clone())
    }
}

/// Records uploaded keys and returns deterministic permanent URLs.
#[derive(Clone, Default)]
pub struct RecordingObjectStorage {
    keys: Arc<Mutex<Vec<String>>>,
}

impl RecordingObjectStorage {
    pub fn uploads(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl ObjectStorage for RecordingObjectStorage {
    async fn upload(&self, _data: &[u8], key: &str) -> Result<String, ProviderError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://cdn.example/{key}"))
    }

    async fn delete(&self, key_or_url: &str) -> Result<(), ProviderError> {
        self.keys
            .lock()
            .unwrap()
            .retain(|k| k != key_or_url && format!("https://cdn.example/{k}") != key_or_url);
        Ok(())
    }
}
