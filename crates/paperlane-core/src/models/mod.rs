//! Data models shared across the relay, the upstream clients, and the API client.

mod document;
mod instructions;

pub use document::{ConvertedDocument, SourceDocument, PDF_MEDIA_TYPE};
pub use instructions::{ActionKind, OutputFormat, ProcessingInstructions};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body of `POST /api/v0/preview-upload`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUploadResponse {
    pub success: bool,
    /// Opaque identifier assigned by the preview/hosting service.
    pub document_id: String,
}
