use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One row of the `file_metadata` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FileMetadataEntity {
    pub id: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub storage_bucket: String,
    pub content_type: String,
    pub author_name: Option<String>,
    pub expiration_date: Option<chrono::NaiveDate>,
    pub file_size: Option<i64>,
    // Populated out of band by the extraction job
    pub page_count: Option<i32>,
    pub extracted_text: Option<String>,
    pub lambda_processed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
