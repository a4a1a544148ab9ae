//! Configuration module
//!
//! Environment-driven configuration for the relay service: server settings,
//! upstream endpoints and credentials, per-call timeouts, and upload limits.
//! Loaded once at startup; upstream credentials are optional here and
//! enforced per-request (see `validate` for the startup warning pass).

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_CONVERT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PREVIEW_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_DOCUMENT_SIZE_MB: usize = 50;

/// Base configuration shared by the HTTP surface
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Relay configuration: the two upstream collaborators plus upload limits.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub base: BaseConfig,
    // Remote conversion service
    pub conversion_api_url: String,
    pub conversion_api_key: Option<String>,
    pub convert_timeout_secs: u64,
    // Remote preview/hosting service
    pub preview_api_url: String,
    pub preview_api_key: Option<String>,
    pub preview_timeout_secs: u64,
    // Upload limits. Empty allowlists accept any extension/content type.
    pub max_document_size_bytes: usize,
    pub document_allowed_extensions: Vec<String>,
    pub document_allowed_content_types: Vec<String>,
}

/// Application configuration (relay service).
#[derive(Clone, Debug)]
pub struct Config(pub Box<RelayConfig>);

impl Config {
    fn as_relay(&self) -> &RelayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_relay().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = RelayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_relay().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_relay().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_relay().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_relay().base.environment
    }

    pub fn conversion_api_url(&self) -> &str {
        &self.as_relay().conversion_api_url
    }

    pub fn conversion_api_key(&self) -> Option<&str> {
        self.as_relay().conversion_api_key.as_deref()
    }

    pub fn convert_timeout_secs(&self) -> u64 {
        self.as_relay().convert_timeout_secs
    }

    pub fn preview_api_url(&self) -> &str {
        &self.as_relay().preview_api_url
    }

    pub fn preview_api_key(&self) -> Option<&str> {
        self.as_relay().preview_api_key.as_deref()
    }

    pub fn preview_timeout_secs(&self) -> u64 {
        self.as_relay().preview_timeout_secs
    }

    pub fn max_document_size_bytes(&self) -> usize {
        self.as_relay().max_document_size_bytes
    }

    pub fn document_allowed_extensions(&self) -> &[String] {
        &self.as_relay().document_allowed_extensions
    }

    pub fn document_allowed_content_types(&self) -> &[String] {
        &self.as_relay().document_allowed_content_types
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; real environment always wins.
        dotenvy::dotenv().ok();

        let base = BaseConfig {
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            cors_origins: parse_env_list("CORS_ORIGINS", &["*"]),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        };

        let conversion_api_url = required_env("CONVERSION_API_URL")?;
        let preview_api_url = required_env("PREVIEW_API_URL")?;

        let max_document_size_mb: usize =
            parse_env("MAX_DOCUMENT_SIZE_MB", DEFAULT_MAX_DOCUMENT_SIZE_MB)?;

        Ok(Self {
            base,
            conversion_api_url,
            conversion_api_key: optional_env("CONVERSION_API_KEY"),
            convert_timeout_secs: parse_env("CONVERT_TIMEOUT_SECS", DEFAULT_CONVERT_TIMEOUT_SECS)?,
            preview_api_url,
            preview_api_key: optional_env("PREVIEW_API_KEY"),
            preview_timeout_secs: parse_env("PREVIEW_TIMEOUT_SECS", DEFAULT_PREVIEW_TIMEOUT_SECS)?,
            max_document_size_bytes: max_document_size_mb * 1024 * 1024,
            document_allowed_extensions: parse_env_list("DOCUMENT_ALLOWED_EXTENSIONS", &[]),
            document_allowed_content_types: parse_env_list("DOCUMENT_ALLOWED_CONTENT_TYPES", &[]),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.conversion_api_url.trim().is_empty() {
            anyhow::bail!("CONVERSION_API_URL must not be empty");
        }
        if self.preview_api_url.trim().is_empty() {
            anyhow::bail!("PREVIEW_API_URL must not be empty");
        }
        for (name, url) in [
            ("CONVERSION_API_URL", &self.conversion_api_url),
            ("PREVIEW_API_URL", &self.preview_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }
        if self.convert_timeout_secs == 0 {
            anyhow::bail!("CONVERT_TIMEOUT_SECS must be greater than zero");
        }
        if self.preview_timeout_secs == 0 {
            anyhow::bail!("PREVIEW_TIMEOUT_SECS must be greater than zero");
        }
        if self.max_document_size_bytes == 0 {
            anyhow::bail!("MAX_DOCUMENT_SIZE_MB must be greater than zero");
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}

/// Empty values are treated as unset so deployments can blank a key instead
/// of deleting the variable.
fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn parse_env_list(name: &str, default: &[&str]) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}
