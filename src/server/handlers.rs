use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use chrono::Local;

use super::error::AppError;
use super::models::{HealthResponse, SplitRequest, SplitResponse};
use super::store::ArchiveStore;
use crate::pipeline;
use crate::utils::AppConfig;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Main split endpoint: upload a report PDF, receive the split summary.
pub async fn split_document(
    Json(request): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, AppError> {
    tracing::info!("Received split request for filename: {}", request.filename);

    let document_bytes = request.validate_and_decode()?;

    let cap = AppConfig::get().max_report_rows;
    let outcome = pipeline::split_document(&document_bytes, cap)?;

    // The timestamp suffix keeps concurrent requests for same-dated reports
    // from overwriting each other's archive.
    let archive_name = format!(
        "refund-split-{}-{}.zip",
        outcome.date_code,
        Local::now().format("%H%M%S%3f")
    );

    let store = ArchiveStore::from_config();
    store.save(&archive_name, &outcome.archive).await?;

    tracing::info!(
        group_count = outcome.group_count,
        archive = %archive_name,
        "split request completed"
    );

    Ok(Json(SplitResponse::success(
        outcome.date_code,
        outcome.group_count,
        outcome.file_names,
        format!("/api/v1/download/{archive_name}"),
    )))
}

/// Streams a finished archive once, then deletes it after a grace delay.
pub async fn download_archive(Path(filename): Path<String>) -> Result<Response, AppError> {
    let store = ArchiveStore::from_config();

    let bytes = store.take(&filename).await.map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            AppError::ArchiveNotFound
        } else {
            AppError::Io { source: error }
        }
    })?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}
