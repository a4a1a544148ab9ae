//! Paperlane API Library
//!
//! This crate provides the HTTP relay handlers, middleware, and application
//! setup: `/api/v0/convert` forwards a document to the remote conversion
//! service and relays the converted binary back; `/api/v0/preview-upload`
//! forwards a binary to the preview/hosting service and relays the assigned
//! identifier.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
