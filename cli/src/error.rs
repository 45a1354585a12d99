//! Error types for presto-cli
//!
//! Provides user-friendly error messages for the failures `prq` reports on
//! stderr before exiting with status 1.

use presto_link::PrestoLinkError;
use std::fmt;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CLIError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CLIError {
    /// Error from the presto-link library
    LinkError(PrestoLinkError),

    /// Configuration file error
    ConfigurationError(String),

    /// File I/O error
    FileError(String),

    /// Arguments that parse but do not make a runnable invocation
    UsageError(String),

    /// Format error
    FormatError(String),
}

impl CLIError {
    fn format_link_error(err: &PrestoLinkError) -> String {
        match err {
            PrestoLinkError::TransportError(msg) => {
                format!("failed to reach coordinator: {}", Self::clean_nested_message(msg))
            }
            PrestoLinkError::QueryFailed(failure) => format!("failed to query presto: {}", failure),
            PrestoLinkError::InvalidDataSource(msg) | PrestoLinkError::ConfigurationError(msg) => {
                format!("failed to connect to presto: {}", msg)
            }
            other => other.to_string(),
        }
    }

    fn clean_nested_message(message: &str) -> String {
        let mut cleaned = message.trim();
        let prefixes = ["Network error:", "network error:", "error sending request:"];

        loop {
            let mut stripped = false;
            for prefix in &prefixes {
                if let Some(rest) = cleaned.strip_prefix(prefix) {
                    cleaned = rest.trim_start();
                    stripped = true;
                    break;
                }
            }

            if !stripped {
                break;
            }
        }

        cleaned.to_string()
    }
}

impl fmt::Display for CLIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLIError::LinkError(e) => write!(f, "{}", Self::format_link_error(e)),
            CLIError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            CLIError::FileError(msg) => write!(f, "File error: {}", msg),
            CLIError::UsageError(msg) => write!(f, "Usage error: {}", msg),
            CLIError::FormatError(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for CLIError {}

impl From<PrestoLinkError> for CLIError {
    fn from(err: PrestoLinkError) -> Self {
        CLIError::LinkError(err)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(err: std::io::Error) -> Self {
        CLIError::FileError(err.to_string())
    }
}

impl From<toml::de::Error> for CLIError {
    fn from(err: toml::de::Error) -> Self {
        CLIError::ConfigurationError(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presto_link::{ErrorDetail, QueryFailure};

    #[test]
    fn test_error_display() {
        let err = CLIError::UsageError("missing required query argument".into());
        assert_eq!(err.to_string(), "Usage error: missing required query argument");

        let err = CLIError::FileError("queries.sql: not found".into());
        assert_eq!(err.to_string(), "File error: queries.sql: not found");
    }

    #[test]
    fn test_link_error_display() {
        let err = CLIError::from(PrestoLinkError::TransportError(
            "Network error: connection refused".into(),
        ));
        assert_eq!(err.to_string(), "failed to reach coordinator: connection refused");

        let detail = ErrorDetail {
            message: "Table hive.default.t does not exist".into(),
            error_name: "TABLE_NOT_FOUND".into(),
            ..Default::default()
        };
        let err = CLIError::from(PrestoLinkError::QueryFailed(QueryFailure::Server(detail)));
        assert_eq!(
            err.to_string(),
            "failed to query presto: TABLE_NOT_FOUND: Table hive.default.t does not exist"
        );

        let err = CLIError::from(PrestoLinkError::QueryFailed(QueryFailure::HttpStatus {
            status_code: 503,
            body: String::new(),
        }));
        assert_eq!(err.to_string(), "failed to query presto: HTTP status 503");
    }
}
