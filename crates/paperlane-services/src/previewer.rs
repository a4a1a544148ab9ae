//! Client for the remote preview/hosting service.

use std::time::Duration;

use paperlane_core::Config;
use reqwest::multipart;
use serde::Deserialize;

use crate::converter::trim_base_url;
use crate::error::ServiceError;

const UPLOAD_PATH: &str = "/documents";

/// Upstream response to a preview upload. The service has shipped both
/// `document_id` and `id` across versions, so both are accepted.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    document_id: Option<String>,
    id: Option<String>,
}

/// Client for the preview/hosting service.
///
/// Same shape as the conversion client but with its own credential and a
/// shorter timeout: uploading is bandwidth-bound, not CPU-bound.
#[derive(Clone, Debug)]
pub struct PreviewService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl PreviewService {
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
            config.preview_api_url(),
            config.preview_api_key().map(str::to_string),
            Duration::from_secs(config.preview_timeout_secs()),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Upload a binary document for preview hosting; returns the opaque
    /// identifier assigned by the service.
    pub async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured { service: "preview" })?;

        let file_part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", file_part);

        tracing::debug!(filename = %filename, "Uploading document to preview service");

        let response = self
            .http
            .post(format!("{}{}", self.base_url, UPLOAD_PATH))
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
                "Preview service returned an error"
            );
            return Err(ServiceError::UpstreamStatus {
                status: status.as_u16(),
                details,
            });
        }

        // Parse from text rather than response.json() so a 200 with a broken
        // body maps to MalformedResponse, not a transport error.
        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::MalformedResponse(format!("invalid JSON from preview service: {}", e))
        })?;

        parsed
            .document_id
            .or(parsed.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ServiceError::MalformedResponse(
                    "preview response contained neither 'document_id' nor 'id'".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, api_key: Option<&str>) -> PreviewService {
        PreviewService::new(
            base_url,
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    #[tokio::test]
    async fn upload_extracts_document_id_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/documents")
            .match_header("x-api-key", "preview-secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"document_id": "doc-42"}"#)
            .create_async()
            .await;

        let id = client(&server.url(), Some("preview-secret"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect("upload should succeed");

        mock.assert_async().await;
        assert_eq!(id, "doc-42");
    }

    #[tokio::test]
    async fn upload_accepts_legacy_id_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/documents")
            .with_status(200)
            .with_body(r#"{"id": "legacy-7"}"#)
            .create_async()
            .await;

        let id = client(&server.url(), Some("k"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect("upload should succeed");

        assert_eq!(id, "legacy-7");
    }

    #[tokio::test]
    async fn upload_prefers_document_id_over_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/documents")
            .with_status(200)
            .with_body(r#"{"document_id": "primary", "id": "secondary"}"#)
            .create_async()
            .await;

        let id = client(&server.url(), Some("k"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect("upload should succeed");

        assert_eq!(id, "primary");
    }

    #[tokio::test]
    async fn upload_rejects_response_without_identifier() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/documents")
            .with_status(200)
            .with_body(r#"{"status": "stored"}"#)
            .create_async()
            .await;

        let err = client(&server.url(), Some("k"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect_err("should fail");

        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn upload_rejects_non_json_success_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/documents")
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let err = client(&server.url(), Some("k"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect_err("should fail");

        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn upload_maps_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/documents")
            .with_status(413)
            .with_body("too large")
            .create_async()
            .await;

        let err = client(&server.url(), Some("k"))
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect_err("should fail");

        match err {
            ServiceError::UpstreamStatus { status, details } => {
                assert_eq!(status, 413);
                assert_eq!(details, "too large");
            }
            other => panic!("expected UpstreamStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_without_key_never_touches_the_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/documents")
            .expect(0)
            .create_async()
            .await;

        let err = client(&server.url(), None)
            .upload(b"%PDF".to_vec(), "report.pdf")
            .await
            .expect_err("should fail without a key");

        assert!(matches!(err, ServiceError::NotConfigured { service } if service == "preview"));
        mock.assert_async().await;
    }
}
