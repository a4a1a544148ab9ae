use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    extract_convert_form, validate_content_type, validate_file_extension, validate_file_size,
};
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, Response, StatusCode},
};
use paperlane_core::models::{ProcessingInstructions, SourceDocument};
use paperlane_core::validation::sanitize_filename;
use paperlane_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/convert",
    tag = "convert",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Converted document", content_type = "application/pdf"),
        (status = 400, description = "Missing file or instructions", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Credential missing or internal error", body = ErrorResponse)
    )
)]
pub async fn convert_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response<Body>, HttpAppError> {
    let form = extract_convert_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()).into());
    }
    validate_file_size(file.bytes.len(), state.config.max_document_size_bytes())?;

    let raw_instructions = form
        .instructions
        .ok_or_else(|| AppError::BadRequest("No instructions provided".to_string()))?;
    let instructions: ProcessingInstructions = serde_json::from_str(&raw_instructions)
        .map_err(|e| AppError::BadRequest(format!("Malformed instructions: {}", e)))?;

    let filename = sanitize_filename(file.filename.as_deref().unwrap_or("document"))?;
    validate_file_extension(&filename, state.config.document_allowed_extensions())?;
    let content_type = file
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    validate_content_type(&content_type, state.config.document_allowed_content_types())?;

    tracing::info!(
        filename = %filename,
        file_size = file.bytes.len(),
        ocr = instructions.ocr,
        redact = instructions.redact,
        strip_metadata = instructions.strip_metadata,
        action = instructions.action.as_str(),
        "Forwarding document for conversion"
    );

    let document = SourceDocument::new(file.bytes, content_type, filename);
    let converted = state
        .converter
        .convert(document, &instructions)
        .await
        .map_err(HttpAppError::from)?;

    let content_disposition = format!("attachment; filename=\"{}\"", converted.filename);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, converted.media_type.as_str())
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from(converted.bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
