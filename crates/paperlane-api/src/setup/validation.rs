//! Startup configuration validation.

use paperlane_core::Config;

/// Validate configuration at startup.
///
/// Malformed values abort startup. Missing upstream credentials only warn:
/// each request re-checks its own credential and fails with NOT_CONFIGURED,
/// and conversion must stay available while the preview credential is being
/// rolled out (preview is best-effort end to end).
pub fn validate_config(config: &Config) -> Result<(), anyhow::Error> {
    config.validate()?;

    if config.conversion_api_key().is_none() {
        tracing::warn!(
            "CONVERSION_API_KEY is not set; conversion requests will fail until it is configured"
        );
    }
    if config.preview_api_key().is_none() {
        tracing::warn!(
            "PREVIEW_API_KEY is not set; preview uploads will fail and clients fall back to download-only"
        );
    }

    Ok(())
}
