//! Error types for presto-link.
//!
//! End-of-data is not an error: cursors report it as `Ok(None)` / `Ok(false)`.

use crate::convert::ConversionError;
use crate::models::ErrorDetail;

/// Result type for presto-link operations
pub type Result<T> = std::result::Result<T, PrestoLinkError>;

/// Errors that can occur while submitting a query or reading its results.
///
/// `Clone` so a failed cursor can hand the same failure to every later call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PrestoLinkError {
    /// The coordinator could not be reached or the connection broke mid-request
    #[error("Network error: {0}")]
    TransportError(String),

    /// The coordinator answered with a failure, either at HTTP level or as `state: FAILED`
    #[error("Query failed: {0}")]
    QueryFailed(QueryFailure),

    /// A declared column type has no converter
    #[error("Unsupported column type: {0}")]
    UnsupportedType(String),

    /// A single value could not be coerced to its declared type
    #[error("Conversion error: {0}")]
    ConversionError(#[from] ConversionError),

    /// A row did not have one value per column
    #[error("Column count mismatch: expected {expected}, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// A response body was not a valid statement envelope
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid data source: {0}")]
    InvalidDataSource(String),
}

/// Why the coordinator reported a query as failed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFailure {
    /// Non-success HTTP status. The statement protocol reports query errors
    /// with a 200 and a `FAILED` body, so this points at infrastructure.
    HttpStatus { status_code: u16, body: String },

    /// `stats.state` was `FAILED`
    Server(ErrorDetail),
}

impl std::fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryFailure::HttpStatus { status_code, body } if body.is_empty() => {
                write!(f, "HTTP status {}", status_code)
            }
            QueryFailure::HttpStatus { status_code, body } => {
                write!(f, "HTTP status {}: {}", status_code, body)
            }
            QueryFailure::Server(detail) => write!(f, "{}", detail),
        }
    }
}

impl PrestoLinkError {
    /// Server-supplied failure detail, when the server sent one
    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        match self {
            PrestoLinkError::QueryFailed(QueryFailure::Server(detail)) => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PrestoLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PrestoLinkError::SerializationError(err.to_string())
        } else {
            PrestoLinkError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PrestoLinkError {
    fn from(err: serde_json::Error) -> Self {
        PrestoLinkError::SerializationError(err.to_string())
    }
}
