//! In-memory stand-ins for the database and the object store, plus
//! PostgreSQL repository tests that need a live `DATABASE_URL`.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uuid::Uuid;

use crate::api::error;
use crate::modules::file_metadata::{
    model::{ExtractionUpdate, NewFileMetadata},
    repository::FileMetadataRepository,
    schema::FileMetadataEntity,
    storage::{ObjectStorage, StorageError, StorageResult, storage_key},
};

#[derive(Default)]
pub struct InMemoryFileMetadataRepository {
    rows: Mutex<HashMap<Uuid, FileMetadataEntity>>,
    fail_inserts: bool,
}

impl InMemoryFileMetadataRepository {
    pub fn failing() -> Self {
        Self { fail_inserts: true, ..Default::default() }
    }

    pub fn get(&self, id: &Uuid) -> Option<FileMetadataEntity> {
        self.rows.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl FileMetadataRepository for InMemoryFileMetadataRepository {
    async fn create(
        &self,
        file: &NewFileMetadata,
    ) -> Result<FileMetadataEntity, error::SystemError> {
        if self.fail_inserts {
            return Err(error::SystemError::DatabaseError("connection reset".into()));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|r| r.storage_key == file.storage_key) {
            return Err(error::SystemError::DatabaseError("duplicate storage_key".into()));
        }

        let now = chrono::Utc::now();
        let entity = FileMetadataEntity {
            id: file.id,
            file_name: file.file_name.clone(),
            storage_key: file.storage_key.clone(),
            storage_bucket: file.storage_bucket.clone(),
            content_type: file.content_type.clone(),
            author_name: file.author_name.clone(),
            expiration_date: file.expiration_date,
            file_size: file.file_size,
            page_count: None,
            extracted_text: None,
            lambda_processed: false,
            created_at: now,
            updated_at: now,
        };
        rows.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<FileMetadataEntity>, error::SystemError> {
        Ok(self.get(id))
    }

    async fn update_extraction(
        &self,
        id: &Uuid,
        update: &ExtractionUpdate,
    ) -> Result<Option<FileMetadataEntity>, error::SystemError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(id) else {
            return Ok(None);
        };
        if update.file_size.is_some() {
            row.file_size = update.file_size;
        }
        row.page_count = update.page_count;
        row.extracted_text = update.extracted_text.clone();
        row.lambda_processed = true;
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }
}

/// Object store double; signed URLs carry a counter so each one is distinct
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
    signed: AtomicU64,
    fail_uploads: bool,
}

impl MockStorage {
    pub fn failing() -> Self {
        Self { fail_uploads: true, ..Default::default() }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.lock().unwrap().get(key).map(|(_, c)| c.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ObjectStorage for MockStorage {
    fn bucket_name(&self) -> &str {
        "mock-bucket"
    }

    async fn store(
        &self,
        data: Bytes,
        file_id: &Uuid,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        if self.fail_uploads {
            return Err(StorageError::Provider(object_store::Error::Generic {
                store: "mock",
                source: "S3 Error".into(),
            }));
        }
        let key = storage_key(file_id, original_filename);
        self.objects.lock().unwrap().insert(key.clone(), (data, content_type.to_string()));
        Ok(key)
    }

    async fn delete(&self, storage_key: &str) -> bool {
        self.objects.lock().unwrap().remove(storage_key).is_some()
    }

    async fn sign_url(&self, storage_key: &str, expires_in: Duration) -> StorageResult<String> {
        let n = self.signed.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://mock-bucket.s3.amazonaws.com/{}?expires={}&sig={}",
            storage_key,
            expires_in.as_secs(),
            n
        ))
    }
}

#[actix_web::test]
async fn test_mock_storage_delete_is_best_effort() {
    let storage = MockStorage::default();
    let id = Uuid::now_v7();
    let key = storage.store(Bytes::from_static(b"x"), &id, "a.txt", "text/plain").await.unwrap();

    assert!(storage.delete(&key).await);
    assert!(!storage.delete(&key).await);
}

#[actix_web::test]
async fn test_in_memory_extraction_update() {
    let repo = InMemoryFileMetadataRepository::default();
    let id = Uuid::now_v7();
    let created = repo
        .create(&NewFileMetadata {
            id,
            file_name: "doc.pdf".to_string(),
            storage_key: format!("uploads/{}.pdf", id),
            storage_bucket: "mock-bucket".to_string(),
            content_type: "application/pdf".to_string(),
            author_name: None,
            expiration_date: None,
            file_size: Some(10),
        })
        .await
        .unwrap();

    let updated = repo
        .update_extraction(
            &id,
            &ExtractionUpdate {
                file_size: None,
                page_count: Some(5),
                extracted_text: Some("Sample text".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.page_count, Some(5));
    assert_eq!(updated.file_size, Some(10));
    assert!(updated.lambda_processed);
    assert!(updated.updated_at >= created.updated_at);
}

mod pg {
    use super::*;
    use crate::modules::file_metadata::repository_pg::FileMetadataRepositoryPg;

    fn new_file(id: Uuid) -> NewFileMetadata {
        NewFileMetadata {
            id,
            file_name: "doc.pdf".to_string(),
            storage_key: format!("uploads/{}.pdf", id),
            storage_bucket: "test-bucket".to_string(),
            content_type: "application/pdf".to_string(),
            author_name: Some("Ada".to_string()),
            expiration_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31),
            file_size: Some(1024),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_and_find(pool: sqlx::PgPool) {
        let repo = FileMetadataRepositoryPg::new(pool);
        let id = Uuid::now_v7();

        let created = repo.create(&new_file(id)).await.unwrap();
        assert_eq!(created.id, id);
        assert!(!created.lambda_processed);

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.expiration_date, chrono::NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(found.author_name.as_deref(), Some("Ada"));

        assert!(repo.find_by_id(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_storage_key_is_unique(pool: sqlx::PgPool) {
        let repo = FileMetadataRepositoryPg::new(pool);
        let first = new_file(Uuid::now_v7());
        repo.create(&first).await.unwrap();

        let duplicate = NewFileMetadata { id: Uuid::now_v7(), ..first };
        assert!(repo.create(&duplicate).await.is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_extraction(pool: sqlx::PgPool) {
        let repo = FileMetadataRepositoryPg::new(pool);
        let id = Uuid::now_v7();
        repo.create(&new_file(id)).await.unwrap();

        let update = ExtractionUpdate {
            file_size: Some(2048),
            page_count: Some(5),
            extracted_text: Some("Sample text".to_string()),
        };
        let row = repo.update_extraction(&id, &update).await.unwrap().unwrap();

        assert_eq!(row.file_size, Some(2048));
        assert_eq!(row.page_count, Some(5));
        assert_eq!(row.extracted_text.as_deref(), Some("Sample text"));
        assert!(row.lambda_processed);
        assert!(row.updated_at >= row.created_at);
    }
}
