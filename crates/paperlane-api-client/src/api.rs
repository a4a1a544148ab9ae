//! Domain methods: convert and preview-upload.

use std::time::Duration;

use paperlane_core::models::{PreviewUploadResponse, ProcessingInstructions, SourceDocument};
use paperlane_core::validation::pdf_filename;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};

use crate::{api_prefix, ApiClient, ClientError};

/// Conversion is CPU-heavy upstream (OCR especially); minutes, not seconds.
const CONVERT_TIMEOUT: Duration = Duration::from_secs(300);
/// Preview upload is bandwidth-bound; shorter but still generous.
const PREVIEW_TIMEOUT: Duration = Duration::from_secs(60);

/// A converted document held in memory, ready to save or upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedArtifact {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

impl ApiClient {
    /// Convert a document through `POST /api/v0/convert`.
    ///
    /// Returns the converted bytes plus the media type and suggested filename
    /// from the response headers (with a local `.pdf` derivation as fallback).
    pub async fn convert(
        &self,
        document: &SourceDocument,
        instructions: &ProcessingInstructions,
    ) -> Result<ConvertedArtifact, ClientError> {
        let instructions_json = serde_json::to_string(instructions)?;

        let file_part = Part::bytes(document.bytes.clone())
            .file_name(document.filename.clone())
            .mime_str(&document.content_type)?;
        let form = Form::new()
            .part("file", file_part)
            .text("instructions", instructions_json);

        let url = self.build_url(&format!("{}/convert", api_prefix()));
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(CONVERT_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response).await);
        }

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/pdf")
            .to_string();
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| pdf_filename(&document.filename));

        let bytes = response.bytes().await?;

        Ok(ConvertedArtifact {
            bytes: bytes.to_vec(),
            media_type,
            filename,
        })
    }

    /// Upload a binary through `POST /api/v0/preview-upload`; returns the
    /// opaque document identifier assigned by the preview service.
    pub async fn preview_upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<String, ClientError> {
        let file_part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", file_part);

        let url = self.build_url(&format!("{}/preview-upload", api_prefix()));
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(PREVIEW_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response).await);
        }

        let body = response.text().await?;
        let parsed: PreviewUploadResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::UnexpectedResponse(format!("invalid JSON body: {}", e)))?;

        if parsed.document_id.is_empty() {
            return Err(ClientError::UnexpectedResponse(
                "preview response carried an empty document id".to_string(),
            ));
        }

        Ok(parsed.document_id)
    }
}

/// Build an `Api` error from a non-success response, preferring the JSON
/// error body's `error`/`details` fields over raw text.
async fn api_error(status: u16, response: reqwest::Response) -> ClientError {
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(body) if body.get("error").is_some() => ClientError::Api {
            status,
            message: body["error"].as_str().unwrap_or("Unknown error").to_string(),
            details: body["details"].as_str().map(str::to_string),
        },
        _ => ClientError::Api {
            status,
            message: text,
            details: None,
        },
    }
}

/// Pull the filename out of `attachment; filename="x.pdf"`.
fn filename_from_content_disposition(value: &str) -> Option<String> {
    let marker = "filename=";
    let start = value.find(marker)? + marker.len();
    let rest = value[start..].trim();
    let name = rest
        .trim_start_matches('"')
        .split('"')
        .next()
        .unwrap_or(rest)
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
