//! Test helpers: build AppState and router for integration tests.
//!
//! Upstream services are mocked with mockito; each test points the relay's
//! upstream base URLs at its own mock server. No real network is involved.

use axum_test::TestServer;
use paperlane_api::constants;
use paperlane_api::setup::routes::setup_routes;
use paperlane_api::state::AppState;
use paperlane_core::{BaseConfig, Config, RelayConfig};
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Upstream endpoints and credentials for one test app.
pub struct Upstreams<'a> {
    pub conversion_url: &'a str,
    pub conversion_key: Option<&'a str>,
    pub preview_url: &'a str,
    pub preview_key: Option<&'a str>,
}

impl Default for Upstreams<'_> {
    fn default() -> Self {
        Self {
            // Unroutable defaults; tests that exercise an upstream override it
            conversion_url: "http://127.0.0.1:1",
            conversion_key: Some("test-conversion-key"),
            preview_url: "http://127.0.0.1:1",
            preview_key: Some("test-preview-key"),
        }
    }
}

pub fn test_config(upstreams: &Upstreams<'_>) -> Config {
    Config(Box::new(RelayConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        conversion_api_url: upstreams.conversion_url.to_string(),
        conversion_api_key: upstreams.conversion_key.map(str::to_string),
        convert_timeout_secs: 5,
        preview_api_url: upstreams.preview_url.to_string(),
        preview_api_key: upstreams.preview_key.map(str::to_string),
        preview_timeout_secs: 5,
        max_document_size_bytes: 10 * 1024 * 1024,
        document_allowed_extensions: vec![],
        document_allowed_content_types: vec![],
    }))
}

/// Setup a test server against the given upstream endpoints.
pub fn setup_test_app(upstreams: &Upstreams<'_>) -> TestServer {
    let config = test_config(upstreams);
    let state = Arc::new(AppState::from_config(config.clone()).expect("app state"));
    let router = setup_routes(&config, state).expect("router");
    TestServer::new(router).expect("test server")
}
