//! Client for the remote document conversion service.

use std::time::Duration;

use paperlane_core::models::{
    ConvertedDocument, ProcessingInstructions, SourceDocument, PDF_MEDIA_TYPE,
};
use paperlane_core::validation::pdf_filename;
use paperlane_core::Config;
use reqwest::multipart;

use crate::error::ServiceError;

const CONVERT_PATH: &str = "/convert";

/// Client for the remote conversion service.
///
/// Holds the server-side credential; callers never see it. The base URL is
/// injectable so tests can point the client at a mock server.
#[derive(Clone, Debug)]
pub struct ConverterService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ConverterService {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trim_base_url(base_url.into()),
            api_key,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Self::new(
            config.conversion_api_url(),
            config.conversion_api_key().map(str::to_string),
            Duration::from_secs(config.convert_timeout_secs()),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Convert a document according to the given instructions.
    ///
    /// One multipart POST: the document bytes under their original filename
    /// and declared media type, the instructions as a JSON form field, and
    /// the filename echoed separately for remote-side logging. The timeout
    /// is minutes-scale because OCR-heavy conversion is CPU-bound upstream.
    pub async fn convert(
        &self,
        document: SourceDocument,
        instructions: &ProcessingInstructions,
    ) -> Result<ConvertedDocument, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured {
                service: "conversion",
            })?;

        let output_filename = pdf_filename(&document.filename);
        let instructions_json = serde_json::to_string(instructions)?;

        let file_part = multipart::Part::bytes(document.bytes)
            .file_name(document.filename.clone())
            .mime_str(&document.content_type)?;
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("instructions", instructions_json)
            .text("filename", document.filename.clone());

        tracing::debug!(
            filename = %document.filename,
            "Forwarding document to conversion service"
        );

        let response = self
            .http
            .post(format!("{}{}", self.base_url, CONVERT_PATH))
            .header("X-API-Key", api_key)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = status.as_u16(),
                "Conversion service returned an error"
            );
            return Err(ServiceError::UpstreamStatus {
                status: status.as_u16(),
                details,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            output_bytes = bytes.len(),
            output_filename = %output_filename,
            "Conversion service returned converted document"
        );

        Ok(ConvertedDocument {
            bytes: bytes.to_vec(),
            media_type: PDF_MEDIA_TYPE.to_string(),
            filename: output_filename,
        })
    }
}

pub(crate) fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
