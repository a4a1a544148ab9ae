//! Upstream service clients.
//!
//! Thin reqwest wrappers around the two remote collaborators: the document
//! conversion service and the preview/hosting service. Each client checks
//! its credential before touching the network, applies its own per-request
//! timeout, and maps upstream failures to `ServiceError` with the upstream
//! status and body preserved.

mod converter;
mod error;
mod previewer;

pub use converter::ConverterService;
pub use error::ServiceError;
pub use previewer::PreviewService;
