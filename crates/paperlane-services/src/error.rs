//! Upstream client error type.

/// Failures raised by the upstream service clients.
///
/// `NotConfigured` is checked before any request is built, so a missing
/// credential never costs a network round trip or leaks a filename upstream.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The credential for the named service is absent or empty.
    #[error("{service} API key not configured")]
    NotConfigured { service: &'static str },

    /// The upstream returned a non-success status; the body is preserved.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16, details: String },

    /// The upstream returned success but the body is not what the contract
    /// promises (e.g. a preview response with no identifier).
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Request could not be sent or the response could not be read.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local serialization failure while building the request.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ServiceError::Transport(e) if e.is_timeout())
    }
}
