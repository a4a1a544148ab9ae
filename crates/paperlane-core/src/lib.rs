//! Paperlane core library
//!
//! Shared building blocks for the Paperlane document relay: configuration,
//! the error taxonomy, wire/data models, and filename validation helpers.
//! This crate performs no I/O; the HTTP surface lives in `paperlane-api` and
//! the upstream clients in `paperlane-services`.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::{BaseConfig, Config, RelayConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
