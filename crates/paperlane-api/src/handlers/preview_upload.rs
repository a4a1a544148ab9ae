use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, validate_file_size};
use axum::{
    extract::{Multipart, State},
    Json,
};
use paperlane_core::models::PreviewUploadResponse;
use paperlane_core::validation::sanitize_filename;
use paperlane_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/preview-upload",
    tag = "preview",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document uploaded for preview", body = PreviewUploadResponse),
        (status = 400, description = "Missing or empty file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Credential missing or internal error", body = ErrorResponse)
    )
)]
pub async fn preview_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<PreviewUploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()).into());
    }
    validate_file_size(file.bytes.len(), state.config.max_document_size_bytes())?;

    let filename = sanitize_filename(file.filename.as_deref().unwrap_or("document.pdf"))?;

    tracing::info!(
        filename = %filename,
        file_size = file.bytes.len(),
        "Forwarding document to preview hosting"
    );

    let document_id = state
        .previewer
        .upload(file.bytes, &filename)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(PreviewUploadResponse {
        success: true,
        document_id,
    }))
}
