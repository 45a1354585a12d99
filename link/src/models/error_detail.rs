use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Structured failure report attached to a response whose state is `FAILED`.
///
/// # Example (JSON representation)
///
/// ```json
/// {
///   "message": "line 1:15: Table hive.default.missing does not exist",
///   "errorCode": 46,
///   "errorName": "TABLE_NOT_FOUND",
///   "errorType": "USER_ERROR",
///   "errorLocation": { "lineNumber": 1, "columnNumber": 15 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,

    /// Numeric error code
    #[serde(default)]
    pub error_code: i64,

    /// Symbolic error name (e.g. `SYNTAX_ERROR`)
    #[serde(default)]
    pub error_name: String,

    /// Error class (`USER_ERROR`, `INTERNAL_ERROR`, ...)
    #[serde(default)]
    pub error_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_location: Option<ErrorLocation>,

    /// Server-side exception chain, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_info: Option<JsonValue>,
}

/// Position in the query text that caused a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLocation {
    pub line_number: u32,
    pub column_number: u32,
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.error_name.is_empty(), self.message.is_empty()) {
            (true, true) => write!(f, "server reported FAILED state")?,
            (true, false) => write!(f, "{}", self.message)?,
            (false, true) => write!(f, "{}", self.error_name)?,
            (false, false) => write!(f, "{}: {}", self.error_name, self.message)?,
        }
        if let Some(location) = self.error_location {
            write!(f, " (line {}, column {})", location.line_number, location.column_number)?;
        }
        Ok(())
    }
}
