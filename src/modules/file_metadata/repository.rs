use uuid::Uuid;

use crate::{
    api::error,
    modules::file_metadata::{
        model::{ExtractionUpdate, NewFileMetadata},
        schema::FileMetadataEntity,
    },
};

#[async_trait::async_trait]
pub trait FileMetadataRepository {
    async fn create(&self, file: &NewFileMetadata)
    -> Result<FileMetadataEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid)
    -> Result<Option<FileMetadataEntity>, error::SystemError>;

    /// Record the results of the extraction job; never called by the request handlers
    #[allow(unused)]
    async fn update_extraction(
        &self,
        id: &Uuid,
        update: &ExtractionUpdate,
    ) -> Result<Option<FileMetadataEntity>, error::SystemError>;
}
