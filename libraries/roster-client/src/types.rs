//! Types for Roster API requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header the backend reads the auth token from.
pub const DEFAULT_TOKEN_HEADER: &str = "X-Token";

/// Configuration for connecting to the user-registry backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://admin.example.com/api")
    pub url: String,
    /// Name of the request header carrying the token
    pub token_header: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with just the URL and default header/timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Mutation Types
// =============================================================================

/// Acknowledgement returned by logout and the user mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: true }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub status: bool,
    pub error: String,
    #[serde(default)]
    pub extra_data: Option<serde_json::Value>,
}
