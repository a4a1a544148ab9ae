//! API constants.
//!
//! Route definitions and handler path annotations both use the `/api/v0`
//! prefix; bump `API_VERSION` and the literals together when versioning.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Current API version
pub const API_VERSION: &str = "v0";

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v0";
