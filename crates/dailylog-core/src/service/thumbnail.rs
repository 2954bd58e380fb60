//! Thumbnail generation and persistence pipeline.

use chrono::Utc;
use dailylog_types::diary::Diary;
use dailylog_types::error::DiaryError;
use tracing::info;
use uuid::Uuid;

use crate::prompt::illustration_prompt;
use crate::provider::{ImageFetcher, ImageGenerator, ObjectStorage};
use crate::repository::DiaryRepository;

/// Two-step thumbnail flow: generate a candidate at a transient URL, then
/// attach a chosen candidate permanently by copying it into object storage.
pub struct ThumbnailService<D, G, F, S>
where
    D: DiaryRepository,
    G: ImageGenerator,
    F: ImageFetcher,
    S: ObjectStorage,
{
    diary_repo: D,
    generator: G,
    fetcher: F,
    storage: S,
}

impl<D, G, F, S> ThumbnailService<D, G, F, S>
where
    D: DiaryRepository,
    G: ImageGenerator,
    F: ImageFetcher,
    S: ObjectStorage,
{
    pub fn new(diary_repo: D, generator: G, fetcher: F, storage: S) -> Self {
        Self {
            diary_repo,
            generator,
            fetcher,
            storage,
        }
    }

    /// Generate a candidate thumbnail for a diary.
    ///
    /// Returns the provider's transient URL; nothing is persisted.
    pub async fn generate_example(&self, diary_id: &Uuid) -> Result<String, DiaryError> {
        let diary = self
            .diary_repo
            .find_by_id(diary_id)
            .await?
            .ok_or(DiaryError::NotFound)?;

        let prompt = illustration_prompt(&diary.content);
        let url = self.generator.generate(&prompt).await?;

        info!(diary_id = %diary_id, "Example thumbnail generated");
        Ok(url)
    }

    /// Copy an image from its transient source URL into durable storage
    /// and record the permanent URL on the diary.
    ///
    /// The diary lookup happens before any network call, so an unknown id
    /// performs no fetch and no upload.
    pub async fn attach(&self, diary_id: &Uuid, source_url: &str) -> Result<Diary, DiaryError> {
        let mut diary = self
            .diary_repo
            .find_by_id(diary_id)
            .await?
            .ok_or(DiaryError::NotFound)?;

        let data = self.fetcher.fetch(source_url).await?;
        let key = thumbnail_key(&diary.id);
        let permanent_url = self.storage.upload(&data, &key).await?;

        diary.thumbnail_url = Some(permanent_url);
        diary.updated_at = Utc::now();
        self.diary_repo.update(&diary).await?;

        info!(diary_id = %diary_id, key = %key, "Thumbnail attached");
        Ok(diary)
    }
}

/// Storage key for a diary thumbnail.
///
/// The v7 suffix keeps re-attached thumbnails from colliding with or
/// overwriting earlier uploads for the same diary.
pub fn thumbnail_key(diary_id: &Uuid) -> String {
    format!("thumbnails/{diary_id}-{}.png", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::{
        FakeImageFetcher, FakeImageGenerator, InMemoryDiaryRepository, RecordingObjectStorage,
    };

    fn service(
        diaries: InMemoryDiaryRepository,
        storage: RecordingObjectStorage,
    ) -> ThumbnailService<
        InMemoryDiaryRepository,
        FakeImageGenerator,
        FakeImageFetcher,
        RecordingObjectStorage,
    > {
        ThumbnailService::new(
            diaries,
            FakeImageGenerator::new("https://images.example/transient/42"),
            FakeImageFetcher::new(vec![0x89, 0x50, 0x4e, 0x47]),
            storage,
        )
    }

    fn diary() -> Diary {
        Diary::new(
            Uuid::now_v7(),
            None,
            Some("Evening".to_string()),
            "We cooked dinner together and talked for hours.".to_string(),
            false,
        )
    }

    #[tokio::test]
    async fn test_generate_example_returns_transient_url() {
        let diaries = InMemoryDiaryRepository::default();
        let d = diaries.insert(diary()).await;
        let service = service(diaries, RecordingObjectStorage::default());

        let url = service.generate_example(&d.id).await.unwrap();
        assert_eq!(url, "https://images.example/transient/42");
    }

    #[tokio::test]
    async fn test_generate_example_unknown_diary_fails() {
        let service = service(
            InMemoryDiaryRepository::default(),
            RecordingObjectStorage::default(),
        );
        let err = service.generate_example(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, DiaryError::NotFound));
    }

    #[tokio::test]
    async fn test_attach_uploads_and_persists_permanent_url() {
        let diaries = InMemoryDiaryRepository::default();
        let storage = RecordingObjectStorage::default();
        let d = diaries.insert(diary()).await;
        let service = service(diaries.clone(), storage.clone());

        let updated = service
            .attach(&d.id, "https://images.example/transient/42")
            .await
            .unwrap();

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].starts_with(&format!("thumbnails/{}-", d.id)));
        assert!(uploads[0].ends_with(".png"));

        let url = updated.thumbnail_url.unwrap();
        assert!(url.starts_with("https://cdn.example/"));
        let stored = diaries.all().await.remove(0);
        assert_eq!(stored.thumbnail_url, Some(url));
    }

    #[tokio::test]
    async fn test_attach_unknown_diary_performs_no_upload() {
        let storage = RecordingObjectStorage::default();
        let service = service(InMemoryDiaryRepository::default(), storage.clone());

        let err = service
            .attach(&Uuid::now_v7(), "https://images.example/transient/42")
            .await
            .unwrap_err();
        assert!(matches!(err, DiaryError::NotFound));
        assert!(storage.uploads().is_empty());
    }

    #[test]
    fn test_thumbnail_keys_are_unique_per_attach() {
        let id = Uuid::now_v7();
        assert_ne!(thumbnail_key(&id), thumbnail_key(&id));
    }
}
