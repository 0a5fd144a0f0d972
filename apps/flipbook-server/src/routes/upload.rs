//! PDF upload endpoint
//!
//! POST /upload - multipart form with the PDF in a field named `file`

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response after a PDF became a flipbook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub flipbook_id: String,
    pub flipbook_url: String,
}

pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidRequest(format!("Failed to read upload: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidRequest(format!("Failed to read file data: {}", e))
        })?;

        tracing::debug!("Read {} bytes of '{}'", data.len(), filename);

        let flipbook = state.ingestion().ingest(&filename, data.to_vec()).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: format!(
                    "PDF converted into {} pages and uploaded",
                    flipbook.image_urls.len()
                ),
                flipbook_url: format!("/flipbook/{}", flipbook.id),
                flipbook_id: flipbook.id,
            }),
        ));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::InvalidRequest(
        "No file provided. Use field name 'file'".to_string(),
    ))
}
