use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::utils::AppConfig;

/// Base64 encoding expands data by ~4/3, so the max encoded length is
/// derived from the configured max file size.
fn max_base64_length() -> usize {
    (AppConfig::get().max_file_size as usize / 3 + 1) * 4
}

const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '\\', '\0'];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRequest {
    /// Base64-encoded PDF data
    pub data: String,

    /// Filename with extension; only `.pdf` is accepted
    pub filename: String,
}

impl SplitRequest {
    pub fn validate_and_decode(&self) -> Result<Vec<u8>, ValidationError> {
        self.validate_filename()?;
        self.validate_and_decode_base64()
    }

    fn validate_and_decode_base64(&self) -> Result<Vec<u8>, ValidationError> {
        if self.data.len() > max_base64_length() {
            return Err(ValidationError::Base64DataTooLarge);
        }

        let decoded = STANDARD
            .decode(&self.data)
            .map_err(|e| ValidationError::InvalidBase64(e.to_string()))?;

        if decoded.len() > AppConfig::get().max_file_size as usize {
            return Err(ValidationError::FileSizeTooLarge);
        }

        Ok(decoded)
    }

    fn validate_filename(&self) -> Result<(), ValidationError> {
        let filename = self.filename.trim();

        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        if filename.len() > 255 {
            return Err(ValidationError::FilenameTooLong);
        }

        for ch in filename.chars() {
            if FORBIDDEN_FILENAME_CHARS.contains(&ch) {
                return Err(ValidationError::ForbiddenCharacter(ch));
            }
        }

        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or(ValidationError::MissingExtension)?;

        if !extension.eq_ignore_ascii_case("pdf") {
            return Err(ValidationError::UnsupportedFileType(extension.to_string()));
        }

        Ok(())
    }
}

/// Summary returned after a successful split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResponse {
    pub success: bool,
    pub date_code: String,
    pub group_count: usize,
    pub file_count: usize,
    pub file_names: Vec<String>,
    pub download_reference: String,
}

impl SplitResponse {
    pub fn success(
        date_code: String,
        group_count: usize,
        file_names: Vec<String>,
        download_reference: String,
    ) -> Self {
        Self {
            success: true,
            date_code,
            group_count,
            file_count: file_names.len(),
            file_names,
            download_reference,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
