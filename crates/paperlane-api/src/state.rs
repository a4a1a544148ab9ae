//! Application state.
//!
//! One stateless bundle per process: the loaded configuration and the two
//! upstream clients. Handlers extract it via `State<Arc<AppState>>`; there is
//! no per-request or cross-request mutable state.

use anyhow::Context;
use paperlane_core::Config;
use paperlane_services::{ConverterService, PreviewService};

pub struct AppState {
    pub config: Config,
    pub converter: ConverterService,
    pub previewer: PreviewService,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, anyhow::Error> {
        let converter = ConverterService::from_config(&config)
            .context("Failed to build conversion service client")?;
        let previewer = PreviewService::from_config(&config)
            .context("Failed to build preview service client")?;

        Ok(Self {
            config,
            converter,
            previewer,
        })
    }
}
