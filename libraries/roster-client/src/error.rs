//! Error types for the Roster client.

use thiserror::Error;

/// Errors that can occur when talking to the user-registry backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Missing or rejected token
    #[error("Authentication required")]
    AuthRequired,

    /// Login rejected (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Token accepted but the server refused the operation, or the token
    /// was invalid or expired
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Invalid auth header name
    #[error("Invalid token header name: {0}")]
    InvalidHeader(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed but had the wrong shape (e.g. an object instead of a list)
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Token storage failed
    #[error("Session storage error: {0}")]
    Session(String),

    /// IO error while reading or writing avatar files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Rejected before sending
    #[error(transparent)]
    Invalid(#[from] roster_core::RosterError),
}

impl ClientError {
    /// Whether the operator has to log in (again) to recover.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::AuthRequired | ClientError::AuthFailed(_) | ClientError::Forbidden(_)
        )
    }

    /// Message suitable for showing to the operator.
    ///
    /// Server-provided messages are passed through; everything else falls
    /// back to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::AuthFailed(msg)
            | ClientError::Forbidden(msg)
            | ClientError::NotFound(msg) => msg.clone(),
            ClientError::ServerError { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
