//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use paperlane_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Telemetry first so validation warnings are visible
    crate::telemetry::init_telemetry();

    // Validate configuration - fail fast on malformed values, warn on
    // missing upstream credentials (those fail per-request)
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Build upstream clients
    let state = Arc::new(AppState::from_config(config.clone())?);

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
