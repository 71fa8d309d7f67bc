use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

use crate::modules::file_metadata::schema::FileMetadataEntity;

/// Bytes and declared type of the `file` part; its name travels in `UploadForm`
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// File upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub url_expiration: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50MB
            url_expiration: Duration::from_secs(3600),
        }
    }
}

/// Descriptive fields accompanying an upload
#[derive(Debug, Default, Validate)]
pub struct UploadForm {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters long"
    ))]
    pub file_name: String,
    #[validate(length(max = 255, message = "Author name must be at most 255 characters long"))]
    pub author_name: Option<String>,
    pub expiration_date: Option<chrono::NaiveDate>,
}

/// New file metadata to insert into database
#[derive(Debug, Clone)]
pub struct NewFileMetadata {
    pub id: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub storage_bucket: String,
    pub content_type: String,
    pub author_name: Option<String>,
    pub expiration_date: Option<chrono::NaiveDate>,
    pub file_size: Option<i64>,
}

/// Fields written back by the extraction job once it has processed an object
#[allow(unused)]
#[derive(Debug, Clone)]
pub struct ExtractionUpdate {
    pub file_size: Option<i64>,
    pub page_count: Option<i32>,
    pub extracted_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub file_id: Uuid,
}

/// Read-only projection of a metadata row plus a freshly signed download link
#[derive(Debug, Serialize, Deserialize)]
pub struct FileMetadataResponse {
    pub id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub content_type: String,
    pub author_name: Option<String>,
    pub expiration_date: Option<chrono::NaiveDate>,
    pub file_size: Option<i64>,
    pub page_count: Option<i32>,
    pub extracted_text: Option<String>,
    pub lambda_processed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl FileMetadataResponse {
    pub fn from_entity(entity: FileMetadataEntity, file_url: String) -> Self {
        FileMetadataResponse {
            id: entity.id,
            file_name: entity.file_name,
            file_url,
            content_type: entity.content_type,
            author_name: entity.author_name,
            expiration_date: entity.expiration_date,
            file_size: entity.file_size,
            page_count: entity.page_count,
            extracted_text: entity.extracted_text,
            lambda_processed: entity.lambda_processed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
