//! The two-stage conversion pipeline.
//!
//! Convert is a hard dependency: its failure ends the run and the preview
//! call is never made. Preview is best-effort: its failure becomes a
//! `PreviewWarning` inside an otherwise successful outcome. The outcome type
//! makes that policy structural — `PipelineOutcome` cannot exist without an
//! artifact, and a failed preview is a value on the success path, not an
//! error path.
//!
//! Per invocation: Idle → Converting → {ConversionFailed | Converted} →
//! PreviewUploading → {PreviewReady | PreviewFailed} → Done, where
//! PreviewFailed still terminates in `Ok`.

use paperlane_core::models::{ProcessingInstructions, SourceDocument};

use crate::api::ConvertedArtifact;
use crate::{ApiClient, ClientError};

const DEFAULT_VIEWER_BASE_URL: &str = "https://viewer.paperlane.io";

/// Client-side pipeline settings.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Base URL of the hosted viewer; preview links are built against it.
    pub viewer_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            viewer_base_url: DEFAULT_VIEWER_BASE_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create from environment: PAPERLANE_VIEWER_URL, with a hosted default.
    pub fn from_env() -> Self {
        Self {
            viewer_base_url: std::env::var("PAPERLANE_VIEWER_URL")
                .unwrap_or_else(|_| DEFAULT_VIEWER_BASE_URL.to_string()),
        }
    }
}

/// A hosted preview: the opaque identifier and the viewer URL built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLink {
    pub document_id: String,
    pub url: String,
}

/// Non-fatal preview failure attached to a successful outcome.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct PreviewWarning {
    pub message: String,
}

/// Outcome of a successful pipeline run. The artifact is always present;
/// the preview either resolved to a link or degraded to a warning.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub artifact: ConvertedArtifact,
    pub preview: Result<PreviewLink, PreviewWarning>,
}

impl PipelineOutcome {
    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().ok().map(|link| link.url.as_str())
    }

    pub fn preview_warning(&self) -> Option<&PreviewWarning> {
        self.preview.as_ref().err()
    }
}

/// Fatal pipeline failure: the conversion step failed.
#[derive(Debug, thiserror::Error)]
#[error("conversion failed: {source}")]
pub struct PipelineError {
    #[source]
    pub source: ClientError,
}

impl PipelineError {
    /// HTTP status reported by the conversion relay, if the failure was an
    /// API-level error.
    pub fn status(&self) -> Option<u16> {
        self.source.status()
    }
}

impl ApiClient {
    /// Run the full pipeline: convert, then best-effort preview upload.
    pub async fn run_pipeline(
        &self,
        config: &PipelineConfig,
        document: SourceDocument,
        instructions: &ProcessingInstructions,
    ) -> Result<PipelineOutcome, PipelineError> {
        tracing::debug!(
            filename = %document.filename,
            file_size = document.len(),
            "Pipeline: converting document"
        );

        let artifact = self
            .convert(&document, instructions)
            .await
            .map_err(|source| PipelineError { source })?;

        tracing::debug!(
            artifact_bytes = artifact.bytes.len(),
            artifact_filename = %artifact.filename,
            "Pipeline: conversion complete, uploading for preview"
        );

        let preview = match self
            .preview_upload(artifact.bytes.clone(), &artifact.filename)
            .await
        {
            Ok(document_id) => {
                let url = preview_url(&config.viewer_base_url, &document_id);
                tracing::debug!(document_id = %document_id, "Pipeline: preview ready");
                Ok(PreviewLink { document_id, url })
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Pipeline: preview upload failed; converted document is still available"
                );
                Err(PreviewWarning {
                    message: format!("Preview unavailable: {}", err),
                })
            }
        };

        Ok(PipelineOutcome { artifact, preview })
    }
}

fn preview_url(viewer_base_url: &str, document_id: &str) -> String {
    format!(
        "{}/view?id={}",
        viewer_base_url.trim_end_matches('/'),
        urlencoding::encode(document_id)
    )
}
