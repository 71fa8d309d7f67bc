use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::borrow::Cow;

use crate::modules::file_metadata::storage::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Upload Failed: {0}")]
    UploadFailed(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::UploadFailed(_) | Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg) | Error::BadRequest(msg) | Error::UploadFailed(msg) => {
                res.json(ErrorBody { message: msg.clone() })
            }
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    // object store errors outside the upload path (signing, configuration)
    #[error("Storage Error : {0}")]
    StorageError(#[from] StorageError),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Database Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Upload Failed: {0}")]
    UploadFailed(Cow<'static, str>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::UploadFailed(msg) => {
                log::error!("Upload rejected by storage provider: {}", msg);
                Error::UploadFailed(msg)
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            log::error!("Unhandled DB error: {:?}", db_err);
            return SystemError::DatabaseError(db_err.message().to_string().into());
        }
        log::error!("{:?}", err);
        SystemError::InternalError(Box::new(err))
    }
}

impl From<validator::ValidationErrors> for SystemError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SystemError::BadRequest(errors.to_string().into())
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upload_failed(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::UploadFailed(msg.into())
    }
}
