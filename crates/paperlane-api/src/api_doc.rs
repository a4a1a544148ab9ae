//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use paperlane_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paperlane API",
        version = "0.1.0",
        description = "Document conversion and preview relay. POST /api/v0/convert forwards a document plus processing instructions to the conversion service and returns the converted PDF; POST /api/v0/preview-upload forwards a binary to the preview hosting service and returns its identifier."
    ),
    paths(
        handlers::convert::convert_document,
        handlers::preview_upload::preview_upload,
    ),
    components(schemas(
        error::ErrorResponse,
        models::PreviewUploadResponse,
        models::ProcessingInstructions,
        models::OutputFormat,
        models::ActionKind,
    )),
    tags(
        (name = "convert", description = "Document conversion relay"),
        (name = "preview", description = "Preview hosting relay")
    )
)]
pub struct ApiDoc;
