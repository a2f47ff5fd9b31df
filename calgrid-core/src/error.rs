//! Error types for calgrid.

use thiserror::Error;

/// Errors raised by the store, configuration and input parsing.
///
/// The grid and filter functions never fail; everything here comes from
/// the collaborators around them.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl From<serde_json::Error> for CalGridError {
    fn from(e: serde_json::Error) -> Self {
        CalGridError::Serialization(e.to_string())
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
