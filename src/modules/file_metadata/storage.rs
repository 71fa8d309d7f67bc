//! Object storage abstraction used by the upload and metadata handlers.
//!
//! Keys are derived from the record id: `uploads/{id}.{ext}` when the original
//! file name has an extension, `uploads/{id}` otherwise. Extensions are limited
//! to ASCII letters, digits, `-` and `_` so the key is stored verbatim by the
//! object store path type; any other extension is dropped.

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::UPLOAD_PREFIX;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Provider(#[from] object_store::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(#[from] object_store::path::Error),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait::async_trait]
pub trait ObjectStorage {
    /// Bucket every object is written to
    fn bucket_name(&self) -> &str;

    /// Store the bytes under the key derived from `file_id` and return that key
    async fn store(
        &self,
        data: Bytes,
        file_id: &Uuid,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Best-effort removal; provider failures are reported as `false`
    #[allow(unused)]
    async fn delete(&self, storage_key: &str) -> bool;

    /// Time-limited GET link. Does not check that the object exists.
    async fn sign_url(&self, storage_key: &str, expires_in: Duration) -> StorageResult<String>;
}

/// Text after the last `.` of the file name, if any and if it is key-safe
pub fn file_extension(original_filename: &str) -> Option<&str> {
    original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
}

pub fn storage_key(file_id: &Uuid, original_filename: &str) -> String {
    match file_extension(original_filename) {
        Some(ext) => format!("{}/{}.{}", UPLOAD_PREFIX, file_id, ext),
        None => format!("{}/{}", UPLOAD_PREFIX, file_id),
    }
}
