use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::api::{error, success};
use crate::constants::MAX_TEXT_FIELD_SIZE;
use crate::modules::file_metadata::{
    model::{FileMetadataResponse, FileUploadResponse, UploadForm, UploadedFile},
    service::FileMetadataService,
};

/// Read a part into memory, giving up with `None` once it grows past `limit` bytes
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<BytesMut>, error::Error> {
    let mut bytes = BytesMut::new();
    while let Some(chunk) =
        field.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, error::Error> {
    let bytes = read_field(field, MAX_TEXT_FIELD_SIZE).await?.ok_or_else(|| {
        error::Error::bad_request(format!(
            "Field '{}' exceeds {} bytes",
            name, MAX_TEXT_FIELD_SIZE
        ))
    })?;
    std::str::from_utf8(&bytes)
        .map(|s| s.to_string())
        .map_err(|_| error::Error::bad_request("Form fields must be valid UTF-8"))
}

/// Collect the `file`, `author_name` and `expiration_date` parts; anything else is
/// discarded chunk by chunk
async fn read_upload(
    mut payload: Multipart,
    max_file_size: usize,
) -> Result<(Option<UploadedFile>, UploadForm), error::Error> {
    let mut file = None;
    let mut form = UploadForm::default();

    while let Some(mut field) =
        payload.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(error::Error::bad_request("Exactly one file part is allowed"));
                }
                // A part without a filename is a plain text field, not a file
                let Some(file_name) = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(|f| f.to_string())
                else {
                    return Err(error::Error::bad_request("No file was submitted"));
                };
                let content_type = field.content_type().map(|m| m.to_string());

                let data = read_field(&mut field, max_file_size).await?.ok_or_else(|| {
                    error::Error::bad_request(format!(
                        "File size exceeds maximum allowed size of {} bytes",
                        max_file_size
                    ))
                })?;

                form.file_name = file_name;
                file = Some(UploadedFile { content_type, data: data.freeze() });
            }
            "author_name" => {
                form.author_name = Some(read_text(&mut field, &name).await?);
            }
            "expiration_date" => {
                let value = read_text(&mut field, &name).await?;
                let value = value.trim();
                if !value.is_empty() {
                    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(
                        |_| error::Error::bad_request("Date has wrong format. Use YYYY-MM-DD"),
                    )?;
                    form.expiration_date = Some(date);
                }
            }
            _ => {
                while field
                    .try_next()
                    .await
                    .map_err(|e| error::Error::bad_request(e.to_string()))?
                    .is_some()
                {}
            }
        }
    }

    Ok((file, form))
}

#[post("/upload")]
pub async fn upload_file(
    service: web::Data<FileMetadataService>,
    payload: Multipart,
) -> Result<success::Success<FileUploadResponse>, error::Error> {
    let (file, form) = read_upload(payload, service.max_file_size()).await?;
    let file = file.ok_or_else(|| error::Error::bad_request("No file was submitted"))?;

    let file_id = service.upload(file, form).await?;
    Ok(success::Success::created(FileUploadResponse { file_id }))
}

#[get("/metadata/{file_id:[0-9a-fA-F-]{36}}")]
pub async fn get_metadata(
    service: web::Data<FileMetadataService>,
    file_id: web::Path<Uuid>,
) -> Result<success::Success<FileMetadataResponse>, error::Error> {
    let metadata = service.get_metadata(file_id.into_inner()).await?;
    Ok(success::Success::ok(metadata))
}
