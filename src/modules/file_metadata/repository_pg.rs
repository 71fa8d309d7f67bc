use uuid::Uuid;

use crate::{
    api::error,
    modules::file_metadata::{
        model::{ExtractionUpdate, NewFileMetadata},
        repository::FileMetadataRepository,
        schema::FileMetadataEntity,
    },
};

#[derive(Clone)]
pub struct FileMetadataRepositoryPg {
    pool: sqlx::PgPool,
}

impl FileMetadataRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileMetadataRepository for FileMetadataRepositoryPg {
    async fn create(
        &self,
        file: &NewFileMetadata,
    ) -> Result<FileMetadataEntity, error::SystemError> {
        let entity = sqlx::query_as::<_, FileMetadataEntity>(
            r#"
            INSERT INTO file_metadata
                (id, file_name, storage_key, storage_bucket, content_type, author_name, expiration_date, file_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(file.id)
        .bind(&file.file_name)
        .bind(&file.storage_key)
        .bind(&file.storage_bucket)
        .bind(&file.content_type)
        .bind(&file.author_name)
        .bind(file.expiration_date)
        .bind(file.file_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<FileMetadataEntity>, error::SystemError> {
        let file = sqlx::query_as::<_, FileMetadataEntity>(
            "SELECT * FROM file_metadata WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    async fn update_extraction(
        &self,
        id: &Uuid,
        update: &ExtractionUpdate,
    ) -> Result<Option<FileMetadataEntity>, error::SystemError> {
        let file = sqlx::query_as::<_, FileMetadataEntity>(
            r#"
            UPDATE file_metadata
            SET file_size = COALESCE($2, file_size),
                page_count = $3,
                extracted_text = $4,
                lambda_processed = TRUE,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.file_size)
        .bind(update.page_count)
        .bind(&update.extracted_text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }
}
