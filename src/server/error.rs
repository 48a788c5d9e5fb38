use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::pipeline::SplitError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Base64 payload exceeds the maximum allowed size")]
    Base64DataTooLarge,

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("File exceeds the maximum allowed size")]
    FileSizeTooLarge,

    #[error("Filename is empty")]
    EmptyFilename,

    #[error("Filename is too long")]
    FilenameTooLong,

    #[error("Filename contains forbidden character '{0}'")]
    ForbiddenCharacter(char),

    #[error("Filename has no extension")]
    MissingExtension,

    #[error("Unsupported file type: {0}, only PDF is accepted")]
    UnsupportedFileType(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid upload")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Split failed")]
    Split {
        #[from]
        source: SplitError,
    },

    #[error("Archive file not found")]
    ArchiveNotFound,

    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad Request".to_string(),
                Some(msg),
            ),
            AppError::Validation { source } => (
                StatusCode::BAD_REQUEST,
                "Invalid Upload".to_string(),
                Some(source.to_string()),
            ),
            AppError::Split {
                source: SplitError::NoRecords,
            } => (
                StatusCode::BAD_REQUEST,
                "No Report Data Found".to_string(),
                Some("No LO report rows were found in the document".to_string()),
            ),
            AppError::Split {
                source: source @ SplitError::Document { .. },
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Document Processing Error".to_string(),
                Some(source.to_string()),
            ),
            AppError::Split {
                source: source @ SplitError::Archive { .. },
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Archive Packaging Error".to_string(),
                Some(source.to_string()),
            ),
            AppError::ArchiveNotFound => (
                StatusCode::NOT_FOUND,
                "Archive Not Found".to_string(),
                None,
            ),
            AppError::Io { source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error".to_string(),
                Some(source.to_string()),
            ),
        };

        let mut error_response = ErrorResponse::new(error_message);
        if let Some(details) = details {
            error_response = error_response.with_details(details);
        }

        (status, Json(error_response)).into_response()
    }
}
