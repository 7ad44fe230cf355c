//! Core error types for Roster
use thiserror::Error;

/// Result type alias using `RosterError`
pub type Result<T> = std::result::Result<T, RosterError>;

/// Core error type for Roster
#[derive(Error, Debug)]
pub enum RosterError {
    /// Unknown sort field name
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Unknown gender value
    #[error("Unknown gender: {0} (expected male or female)")]
    UnknownGender(String),

    /// Hour outside 0..=23
    #[error("Hour out of range: {0} (expected 0-23)")]
    HourOutOfRange(u32),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RosterError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
