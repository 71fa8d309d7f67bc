use log::info;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::error;
use crate::constants::DEFAULT_CONTENT_TYPE;
use crate::modules::file_metadata::{
    model::{FileMetadataResponse, NewFileMetadata, UploadConfig, UploadForm, UploadedFile},
    repository::FileMetadataRepository,
    storage::ObjectStorage,
};

#[derive(Clone)]
pub struct FileMetadataService {
    repo: Arc<dyn FileMetadataRepository + Send + Sync>,
    storage: Arc<dyn ObjectStorage + Send + Sync>,
    config: UploadConfig,
}

impl FileMetadataService {
    pub fn with_dependencies(
        repo: Arc<dyn FileMetadataRepository + Send + Sync>,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
        config: UploadConfig,
    ) -> Self {
        info!("FileMetadataService initialized with dependencies");
        FileMetadataService { repo, storage, config }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Validate file size
    fn validate_file(&self, file: &UploadedFile) -> Result<(), error::SystemError> {
        if file.data.is_empty() {
            return Err(error::SystemError::bad_request("The submitted file is empty"));
        }

        if file.data.len() > self.config.max_file_size {
            return Err(error::SystemError::bad_request(format!(
                "File size exceeds maximum allowed size of {} bytes",
                self.config.max_file_size
            )));
        }

        Ok(())
    }

    /// Store the file, then persist its metadata row. The row is only written
    /// once the object store has accepted the bytes; if the insert fails the
    /// uploaded object is left behind.
    pub async fn upload(
        &self,
        file: UploadedFile,
        form: UploadForm,
    ) -> Result<Uuid, error::SystemError> {
        form.validate()?;
        self.validate_file(&file)?;

        let content_type = file
            .content_type
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let file_size = file.data.len() as i64;
        let id = Uuid::now_v7();

        let storage_key = self
            .storage
            .store(file.data, &id, &form.file_name, &content_type)
            .await
            .map_err(|e| error::SystemError::upload_failed(e.to_string()))?;

        let new_file = NewFileMetadata {
            id,
            file_name: form.file_name,
            storage_key,
            storage_bucket: self.storage.bucket_name().to_string(),
            content_type,
            author_name: form.author_name.filter(|a| !a.trim().is_empty()),
            expiration_date: form.expiration_date,
            file_size: Some(file_size),
        };

        let entity = self.repo.create(&new_file).await?;
        info!("File {} stored at {}", entity.id, entity.storage_key);
        Ok(entity.id)
    }

    pub async fn get_metadata(&self, id: Uuid) -> Result<FileMetadataResponse, error::SystemError> {
        let entity = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("File not found"))?;

        let file_url =
            self.storage.sign_url(&entity.storage_key, self.config.url_expiration).await?;
        Ok(FileMetadataResponse::from_entity(entity, file_url))
    }
}
