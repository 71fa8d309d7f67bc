use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload, RetryConfig};
use std::time::Duration;
use uuid::Uuid;

use crate::modules::file_metadata::storage::{
    ObjectStorage, StorageError, StorageResult, storage_key,
};

/// Connection settings for the S3 bucket holding uploaded files
#[derive(Clone)]
pub struct S3Settings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible providers such as MinIO
    pub endpoint_url: Option<String>,
    pub max_retries: usize,
}

impl S3Settings {
    pub fn from_env(env: &crate::constants::Env) -> Self {
        Self {
            access_key_id: env.aws_access_key_id.clone(),
            secret_access_key: env.aws_secret_access_key.clone(),
            region: env.aws_region.clone(),
            bucket: env.aws_s3_bucket_name.clone(),
            endpoint_url: env.s3_endpoint_url.clone(),
            max_retries: env.s3_max_retries,
        }
    }
}

/// S3 backed object storage, built once per process and shared by every worker
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    pub fn new(settings: S3Settings) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(settings.access_key_id)
            .with_secret_access_key(settings.secret_access_key)
            .with_region(settings.region)
            .with_bucket_name(settings.bucket.clone())
            .with_retry(RetryConfig { max_retries: settings.max_retries, ..Default::default() });

        if let Some(endpoint) = settings.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder.build().map_err(|e| StorageError::Config(e.to_string()))?;

        log::info!("S3 storage initialized for bucket: {}", settings.bucket);
        Ok(Self { store, bucket: settings.bucket })
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3Storage {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn store(
        &self,
        data: Bytes,
        file_id: &Uuid,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        let key = storage_key(file_id, original_filename);
        let location = Path::parse(&key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions { attributes, ..Default::default() };

        self.store.put_opts(&location, PutPayload::from(data), opts).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %location,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::Provider(e)
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %location,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(key)
    }

    async fn delete(&self, storage_key: &str) -> bool {
        let location = match Path::parse(storage_key) {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, key = %storage_key, "S3 delete skipped, invalid key");
                return false;
            }
        };

        match self.store.delete(&location).await {
            Ok(()) => {
                tracing::info!(bucket = %self.bucket, key = %storage_key, "S3 delete successful");
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 delete failed"
                );
                false
            }
        }
    }

    async fn sign_url(&self, storage_key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Path::parse(storage_key)?;
        let url = self.store.signed_url(Method::GET, &location, expires_in).await?;
        Ok(url.to_string())
    }
}
