//! Shared HTTP client for the Paperlane API.
//!
//! Provides a minimal client with typed errors, the domain methods
//! (`convert`, `preview_upload`), and the two-stage pipeline
//! (`run_pipeline`) that combines them with the best-effort preview policy.
//! The CLI uses this client directly.

pub mod api;
pub mod pipeline;

use reqwest::Client;

/// Failures raised by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with an error status; message and details come from
    /// its JSON error body when present.
    #[error("API request failed with status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// Local serialization failure while building the request.
    #[error("failed to encode instructions: {0}")]
    Encode(#[from] serde_json::Error),

    /// The API answered success but the body is not what the contract promises.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// HTTP status of an API-level failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// API version prefix (e.g. "/api/v0"). Set PAPERLANE_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("PAPERLANE_API_VERSION").unwrap_or_else(|_| "v0".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the Paperlane API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self, ClientError> {
        // No global timeout: conversion and preview upload get their own
        // per-request deadlines in api.rs.
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: PAPERLANE_API_URL (or API_URL).
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("PAPERLANE_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Re-export the pipeline surface for convenience.
pub use api::ConvertedArtifact;
pub use paperlane_core::models::{
    ActionKind, OutputFormat, ProcessingInstructions, SourceDocument,
};
pub use pipeline::{PipelineConfig, PipelineError, PipelineOutcome, PreviewLink, PreviewWarning};
